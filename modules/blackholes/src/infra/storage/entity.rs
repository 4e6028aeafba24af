use sea_orm::entity::prelude::*;

use crate::contract::BlackHole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blackholes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub distance_ly: Option<f64>,
    pub mass_solar: Option<f64>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BlackHole {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            distance_ly: m.distance_ly,
            mass_solar: m.mass_solar,
            description: m.description,
        }
    }
}
