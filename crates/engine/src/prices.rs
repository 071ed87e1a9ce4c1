//! Prices table.
//!
//! A price row is an insert-only fact: (product, establishment, amount,
//! recorded_at). Repeated admin entry for the same pair accumulates
//! history; consumers that need a single value per pair pick the most
//! recently inserted row (highest id).

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::PriceCents;

/// A recorded price for a product at an establishment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub id: i32,
    pub product_id: i32,
    pub establishment_id: i32,
    pub amount: PriceCents,
    pub recorded_at: DateTime<Utc>,
}

impl From<Model> for Price {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            establishment_id: model.establishment_id,
            amount: PriceCents::new(model.amount_cents),
            recorded_at: model.recorded_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub establishment_id: i32,
    pub amount_cents: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Products,
    #[sea_orm(
        belongs_to = "super::establishments::Entity",
        from = "Column::EstablishmentId",
        to = "super::establishments::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Establishments,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::establishments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Establishments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
