//! Establishments table.
//!
//! Same lazy-creation lifecycle as products, keyed by name uniqueness
//! within this table. The auto-increment id doubles as creation order,
//! which the ranking engine uses as its tie-break.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An establishment (market, shop) that carries priced products.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Establishment {
    pub id: i32,
    pub name: String,
}

impl From<Model> for Establishment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "establishments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prices::Entity")]
    Prices,
}

impl Related<super::prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
