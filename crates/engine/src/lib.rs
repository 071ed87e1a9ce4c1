//! Core of the price-comparison service.
//!
//! The [`Engine`] owns the database connection and exposes three groups of
//! operations:
//!
//! - accounts: registration and credential verification
//! - catalog: products, establishments and price records
//! - ranking: ordering establishments by total basket cost
//!
//! Access control is explicit: operations that require an administrator
//! take the acting [`User`] as an argument. There is no ambient
//! current-user state.

use sea_orm::DatabaseConnection;
use unicode_normalization::UnicodeNormalization;

pub use catalog::{AUTOCOMPLETE_LIMIT, PriceQuote, PriceReceipt};
pub use error::EngineError;
pub use establishments::Establishment;
pub use money::PriceCents;
pub use prices::Price;
pub use products::Product;
pub use ranking::{RankedEstablishment, UnmatchedPolicy};
pub use users::User;

mod accounts;
mod catalog;
mod error;
mod money;
mod ranking;

pub mod establishments;
pub mod prices;
pub mod products;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Trim and NFC-normalize a user-supplied name, rejecting empty input.
fn normalize_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.nfc().collect())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_rejects_empty() {
        assert_eq!(normalize_name("  Arroz ", "product").unwrap(), "Arroz");
        assert!(normalize_name("   ", "product").is_err());
    }

    #[test]
    fn normalize_applies_nfc() {
        // "João" with a combining tilde normalizes to the precomposed form.
        let decomposed = "Joa\u{0303}o";
        assert_eq!(normalize_name(decomposed, "product").unwrap(), "João");
    }
}
