use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fintrack_core::errors::Error as CoreError;
use fintrack_core::users::{Registration, UserProfile};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::validation::{AppJson, Validator};

/// Tokens stay valid for seven days.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: i64,
    email: String,
    iat: u64,
    exp: u64,
}

/// The caller identified by a verified bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed, expired, or wrong algorithm.
    InvalidOrExpired,
    Internal(String),
}

/// Issues and verifies HS256 session tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl: TOKEN_TTL,
        }
    }

    /// Builds the service from `FT_JWT_SECRET`, or from a random secret when none is set.
    pub fn from_config(secret: Option<&str>) -> anyhow::Result<Self> {
        let key = match secret {
            Some(raw) => decode_secret_key(raw)?,
            None => {
                tracing::warn!(
                    "FT_JWT_SECRET is not set; using a random secret. Tokens will not survive a restart."
                );
                let mut key = vec![0u8; MIN_SECRET_LEN];
                OsRng.fill_bytes(&mut key);
                key
            }
        };
        Ok(Self::new(&key))
    }

    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Internal("System clock is before UNIX_EPOCH".into()))?;
        self.issue_at(user_id, email, now)
    }

    /// Issues a token as if the current time were `now` (since the epoch).
    pub(crate) fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        now: Duration,
    ) -> Result<String, TokenError> {
        let exp = now + self.token_ttl;
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.as_secs(),
            exp: exp.as_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| AuthUser {
                user_id: data.claims.user_id,
                email: data.claims.email,
            })
            .map_err(|_| TokenError::InvalidOrExpired)
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() >= MIN_SECRET_LEN => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or an ASCII string of at least 32 bytes")
        }
    };

    if decoded.len() < MIN_SECRET_LEN {
        anyhow::bail!("JWT secret must decode to at least 32 bytes");
    }

    Ok(decoded)
}

/// Rejects requests without a valid bearer token and exposes the caller as
/// an [`AuthUser`] extension.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            let mut parts = header.splitn(2, ' ');
            match (parts.next(), parts.next()) {
                (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("Bearer") => {
                    Some(token.trim())
                }
                _ => None,
            }
        })
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::MissingToken)?;

    let user = state.tokens.verify(token)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidOrExpired => ApiError::InvalidToken,
            TokenError::Internal(reason) => ApiError::Internal(reason),
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    name: Option<Value>,
    email: Option<Value>,
    password: Option<Value>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: Option<Value>,
    password: Option<Value>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let mut v = Validator::new();
    let name = v.text("name", payload.name.as_ref(), 2, "Name must be at least 2 characters");
    let email = v.email("email", payload.email.as_ref(), "Valid email required");
    let password = v.secret(
        "password",
        payload.password.as_ref(),
        6,
        "Password must be at least 6 characters",
    );
    let registration = v.finish(|| {
        Some(Registration {
            name: name?,
            email: email?,
            password: password?,
        })
    })?;

    let user = state.user_service.register(registration).await?;
    let token = state.tokens.issue(user.id, &user.email)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            token,
            user: user.into(),
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let mut v = Validator::new();
    let email = v.email("email", payload.email.as_ref(), "Valid email required");
    let password = v.secret("password", payload.password.as_ref(), 1, "Password required");
    let (email, password) = v.finish(|| Some((email?, password?)))?;

    let user = state.user_service.authenticate(&email, &password)?;
    let token = state.tokens.issue(user.id, &user.email)?;
    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user,
    }))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<MeResponse>> {
    let user = state
        .user_service
        .find_by_id(auth.user_id)?
        .ok_or_else(|| CoreError::NotFound("User".to_string()))?;
    Ok(Json(MeResponse { user }))
}

/// Routes that do not require a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
