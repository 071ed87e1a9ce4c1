//! First-run seeding: default admin account and a demonstration catalog.
//!
//! Seeding is a setup convenience, not part of the core contract. The
//! sample prices are a fixed grid in the R$ 3.00 - R$ 30.00 range rather
//! than random draws, so repeated first runs produce the same catalog.

use engine::{Engine, EngineError, PriceCents};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

const SAMPLE_ESTABLISHMENTS: [&str; 5] = [
    "Mercado A",
    "Mercado B",
    "Mercado C",
    "Mercado D",
    "Mercado E",
];

const SAMPLE_PRODUCTS: [&str; 10] = [
    "Arroz", "Feijão", "Leite", "Óleo", "Café", "Açúcar", "Biscoito", "Pão", "Carne", "Frango",
];

/// Ensure the admin account exists and, when `seed_samples` is set and
/// the catalog is empty, insert the demonstration data.
pub async fn run(engine: &Engine, seed_samples: bool) -> Result<(), EngineError> {
    let admin = engine.ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD).await?;

    if !seed_samples {
        return Ok(());
    }
    if !engine.list_products().await?.is_empty() {
        return Ok(());
    }

    for (product_idx, product) in SAMPLE_PRODUCTS.iter().enumerate() {
        for (establishment_idx, establishment) in SAMPLE_ESTABLISHMENTS.iter().enumerate() {
            let amount = sample_amount(product_idx, establishment_idx);
            engine
                .record_price(&admin, product, establishment, amount)
                .await?;
        }
    }

    tracing::info!(
        "seeded {} products across {} establishments",
        SAMPLE_PRODUCTS.len(),
        SAMPLE_ESTABLISHMENTS.len()
    );
    Ok(())
}

/// Deterministic stand-in for the original's random R$ 3-30 prices.
fn sample_amount(product_idx: usize, establishment_idx: usize) -> PriceCents {
    let spread = (product_idx * 47 + establishment_idx * 211) % 2700;
    PriceCents::new(300 + spread as i64)
}
