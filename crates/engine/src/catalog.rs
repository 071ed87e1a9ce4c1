//! Catalog operations: products, establishments and price records.

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func},
};
use serde::{Deserialize, Serialize};

use crate::{
    Engine, EngineError, Establishment, Price, PriceCents, Product, ResultEngine, User,
    establishments, normalize_name, prices, products,
};

/// Default cap for [`Engine::autocomplete`].
pub const AUTOCOMPLETE_LIMIT: u64 = 10;

/// Result of recording a price: the (possibly just created) product and
/// establishment plus the inserted price row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReceipt {
    pub product: Product,
    pub establishment: Establishment,
    pub price: Price,
}

/// One establishment's price for a product, as returned by
/// [`Engine::prices_for_product`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub establishment: Establishment,
    pub amount: PriceCents,
    pub recorded_at: chrono::DateTime<Utc>,
}

impl Engine {
    /// Return the product with this exact (normalized) name, creating it
    /// if missing. Idempotent.
    pub async fn find_or_create_product(&self, name: &str) -> ResultEngine<Product> {
        let name = normalize_name(name, "product")?;
        let tx = self.database.begin().await?;
        let model = product_by_name_or_insert(&tx, &name).await?;
        tx.commit().await?;
        Ok(model.into())
    }

    /// Return the establishment with this exact (normalized) name,
    /// creating it if missing. Idempotent.
    pub async fn find_or_create_establishment(&self, name: &str) -> ResultEngine<Establishment> {
        let name = normalize_name(name, "establishment")?;
        let tx = self.database.begin().await?;
        let model = establishment_by_name_or_insert(&tx, &name).await?;
        tx.commit().await?;
        Ok(model.into())
    }

    /// Record a price for a product at an establishment.
    ///
    /// Admin-only. Product and establishment are created on first use;
    /// the whole operation runs in one database transaction so a failure
    /// leaves no partial records. Always inserts a new price row, never
    /// merges with previous ones.
    pub async fn record_price(
        &self,
        actor: &User,
        product_name: &str,
        establishment_name: &str,
        amount: PriceCents,
    ) -> ResultEngine<PriceReceipt> {
        if !actor.is_admin {
            return Err(EngineError::Forbidden(
                "only administrators can record prices".to_string(),
            ));
        }
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "price must not be negative, got {amount}"
            )));
        }
        let product_name = normalize_name(product_name, "product")?;
        let establishment_name = normalize_name(establishment_name, "establishment")?;

        let tx = self.database.begin().await?;

        let product = product_by_name_or_insert(&tx, &product_name).await?;
        let establishment = establishment_by_name_or_insert(&tx, &establishment_name).await?;
        let price = prices::ActiveModel {
            product_id: ActiveValue::Set(product.id),
            establishment_id: ActiveValue::Set(establishment.id),
            amount_cents: ActiveValue::Set(amount.cents()),
            recorded_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&tx)
        .await?;

        tx.commit().await?;

        Ok(PriceReceipt {
            product: product.into(),
            establishment: establishment.into(),
            price: price.into(),
        })
    }

    /// Case-insensitive substring search over product names.
    ///
    /// Results are alphabetical and capped at `limit`; an empty term
    /// matches every product.
    pub async fn autocomplete(&self, term: &str, limit: u64) -> ResultEngine<Vec<String>> {
        let needle = term.trim().to_lowercase();

        // Match and cap in the query itself so a keystroke never scans
        // the whole table.
        let mut query = products::Entity::find();
        if !needle.is_empty() {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(products::Column::Name)))
                    .like(format!("%{needle}%")),
            );
        }
        let models = query
            .order_by_asc(products::Column::Name)
            .limit(limit)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(|model| model.name).collect())
    }

    /// All product names, alphabetical.
    pub async fn list_products(&self) -> ResultEngine<Vec<String>> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(|model| model.name).collect())
    }

    /// Every recorded price for a product, ascending by amount.
    ///
    /// Historical duplicates for the same establishment are all returned.
    /// An unknown product name fails with [`EngineError::ProductNotFound`].
    pub async fn prices_for_product(&self, name: &str) -> ResultEngine<Vec<PriceQuote>> {
        let name = normalize_name(name, "product")?;
        let product = products::Entity::find()
            .filter(products::Column::Name.eq(name.clone()))
            .one(&self.database)
            .await?
            .ok_or(EngineError::ProductNotFound(name))?;

        let rows: Vec<(prices::Model, Option<establishments::Model>)> = prices::Entity::find()
            .filter(prices::Column::ProductId.eq(product.id))
            .order_by_asc(prices::Column::AmountCents)
            .order_by_asc(prices::Column::Id)
            .find_also_related(establishments::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (price_model, establishment_model) in rows {
            let Some(establishment_model) = establishment_model else {
                continue;
            };
            out.push(PriceQuote {
                establishment: establishment_model.into(),
                amount: PriceCents::new(price_model.amount_cents),
                recorded_at: price_model.recorded_at,
            });
        }
        Ok(out)
    }
}

async fn product_by_name_or_insert(
    tx: &DatabaseTransaction,
    name: &str,
) -> ResultEngine<products::Model> {
    if let Some(model) = products::Entity::find()
        .filter(products::Column::Name.eq(name))
        .one(tx)
        .await?
    {
        return Ok(model);
    }
    products::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    }
    .insert(tx)
    .await
    .map_err(Into::into)
}

async fn establishment_by_name_or_insert(
    tx: &DatabaseTransaction,
    name: &str,
) -> ResultEngine<establishments::Model> {
    if let Some(model) = establishments::Entity::find()
        .filter(establishments::Column::Name.eq(name))
        .one(tx)
        .await?
    {
        return Ok(model);
    }
    establishments::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    }
    .insert(tx)
    .await
    .map_err(Into::into)
}
