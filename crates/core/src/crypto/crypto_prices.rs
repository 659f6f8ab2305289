//! Static price table served in place of a market data feed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub type CryptoPrices = BTreeMap<String, Decimal>;

const MOCK_PRICES: [(&str, Decimal); 8] = [
    ("BTC", dec!(43250.50)),
    ("ETH", dec!(2580.75)),
    ("ADA", dec!(0.485)),
    ("DOT", dec!(7.42)),
    ("LINK", dec!(14.85)),
    ("LTC", dec!(72.35)),
    ("XRP", dec!(0.52)),
    ("BCH", dec!(245.80)),
];

/// Returns the fixed symbol -> USD price table. Not live data.
pub fn crypto_prices() -> CryptoPrices {
    MOCK_PRICES
        .iter()
        .map(|(symbol, price)| (symbol.to_string(), *price))
        .collect()
}

/// Price of a single symbol (case-insensitive), if the table knows it.
pub fn price_of(symbol: &str) -> Option<Decimal> {
    MOCK_PRICES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(symbol.trim()))
        .map(|(_, price)| *price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_table() {
        let prices = crypto_prices();
        assert_eq!(prices.len(), 8);
        assert_eq!(prices["BTC"], dec!(43250.50));
        assert_eq!(prices["XRP"], dec!(0.52));
    }

    #[test]
    fn test_price_of_ignores_case() {
        assert_eq!(price_of("eth"), Some(dec!(2580.75)));
        assert_eq!(price_of("DOGE"), None);
    }
}
