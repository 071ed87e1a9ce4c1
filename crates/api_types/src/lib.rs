use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginUser {
        pub username: String,
        pub password: String,
    }

    /// Identity returned by `/login` (no credential material).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub is_admin: bool,
    }
}

pub mod catalog {
    use super::*;

    /// Payload for recording a price (admin only).
    ///
    /// `amount` is a decimal string; `.` and `,` are both accepted as
    /// the decimal separator and at most two decimals are allowed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PriceNew {
        pub product: String,
        pub establishment: String,
        pub amount: String,
    }

    /// Payload for a single-product price search.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductSearch {
        pub name: String,
    }

    /// Query string for `/products/autocomplete`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AutocompleteParams {
        #[serde(default)]
        pub q: String,
    }
}

pub mod basket {
    use super::*;

    /// What to do with basket items that match no known product.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum UnmatchedPolicy {
        #[default]
        Ignore,
        Reject,
    }

    /// Payload for a shopping-basket ranking query.
    ///
    /// `items` is a comma-separated list of product names, mirroring the
    /// original form input.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BasketQuery {
        pub items: String,
        #[serde(default)]
        pub on_unmatched: UnmatchedPolicy,
    }
}
