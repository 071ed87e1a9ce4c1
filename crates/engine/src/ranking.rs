//! Basket ranking: which establishments carry the whole basket, and at
//! what total cost.

use std::collections::HashMap;

use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    Engine, EngineError, Establishment, PriceCents, ResultEngine, establishments, prices, products,
};

/// What to do with basket item names that match no product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Drop unmatched names silently and rank the rest.
    #[default]
    Ignore,
    /// Fail the whole query with `ProductNotFound` for the first
    /// unmatched name.
    Reject,
}

/// An establishment that carries the full basket, with its total cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEstablishment {
    pub establishment: Establishment,
    pub total: PriceCents,
}

impl Engine {
    /// Rank establishments by the total cost of a basket of product names.
    ///
    /// Only establishments with a price for **every** resolved product
    /// appear in the result, ascending by total. Ties keep establishment
    /// creation order (ascending id).
    ///
    /// Where a (product, establishment) pair has accumulated several
    /// price rows, the most recently inserted one wins.
    ///
    /// An empty basket, or one whose names all fail to resolve under
    /// [`UnmatchedPolicy::Ignore`], yields an empty result.
    pub async fn rank_establishments(
        &self,
        names: &[&str],
        policy: UnmatchedPolicy,
    ) -> ResultEngine<Vec<RankedEstablishment>> {
        use unicode_normalization::UnicodeNormalization;

        let mut wanted: Vec<String> = Vec::with_capacity(names.len());
        for raw in names {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let name: String = trimmed.nfc().collect();
            if !wanted.contains(&name) {
                wanted.push(name);
            }
        }
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let product_models = products::Entity::find()
            .filter(products::Column::Name.is_in(wanted.clone()))
            .all(&self.database)
            .await?;

        if policy == UnmatchedPolicy::Reject {
            for name in &wanted {
                if !product_models.iter().any(|p| &p.name == name) {
                    return Err(EngineError::ProductNotFound(name.clone()));
                }
            }
        }

        let product_ids: Vec<i32> = product_models.iter().map(|p| p.id).collect();
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        // One pass over all relevant price rows, keyed by pair. Rows come
        // back in insertion order, so a later row overwrites an earlier
        // one: latest wins.
        let price_models = prices::Entity::find()
            .filter(prices::Column::ProductId.is_in(product_ids.clone()))
            .order_by_asc(prices::Column::Id)
            .all(&self.database)
            .await?;

        let mut price_of: HashMap<(i32, i32), PriceCents> =
            HashMap::with_capacity(price_models.len());
        for model in price_models {
            price_of.insert(
                (model.product_id, model.establishment_id),
                PriceCents::new(model.amount_cents),
            );
        }

        let establishment_models = establishments::Entity::find()
            .order_by_asc(establishments::Column::Id)
            .all(&self.database)
            .await?;

        let mut ranking: Vec<RankedEstablishment> = Vec::new();
        'establishments: for model in establishment_models {
            let mut total = PriceCents::ZERO;
            for product_id in &product_ids {
                match price_of.get(&(*product_id, model.id)) {
                    Some(amount) => {
                        total = total.checked_add(*amount).ok_or_else(|| {
                            EngineError::InvalidAmount("basket total overflow".to_string())
                        })?;
                    }
                    None => continue 'establishments,
                }
            }
            ranking.push(RankedEstablishment {
                establishment: model.into(),
                total,
            });
        }

        // Stable sort keeps creation order on equal totals.
        ranking.sort_by_key(|entry| entry.total);
        Ok(ranking)
    }
}
