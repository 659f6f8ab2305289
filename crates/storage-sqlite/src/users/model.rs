//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a user; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for fintrack_core::users::User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            password_hash: db.password_hash,
            created_at: db.created_at,
        }
    }
}

impl From<fintrack_core::users::NewUser> for NewUserDB {
    fn from(domain: fintrack_core::users::NewUser) -> Self {
        Self {
            name: domain.name,
            email: domain.email,
            password_hash: domain.password_hash,
            created_at: domain.created_at,
        }
    }
}
