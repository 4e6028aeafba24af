use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::{BlackHole, NewBlackHole};

/// Catalog entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlackHoleRead {
    pub id: i32,
    pub name: String,
    /// Distance from Earth in light years.
    pub distance_ly: Option<f64>,
    /// Mass in solar masses.
    pub mass_solar: Option<f64>,
    pub description: Option<String>,
}

/// Payload for creating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlackHoleCreate {
    #[schema(min_length = 1, max_length = 200)]
    pub name: String,
    #[serde(default)]
    #[schema(minimum = 0)]
    pub distance_ly: Option<f64>,
    #[serde(default)]
    #[schema(minimum = 0)]
    pub mass_solar: Option<f64>,
    #[serde(default)]
    #[schema(max_length = 2000)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size, 1..=100 (default 20).
    pub limit: Option<i64>,
    /// Rows to skip (default 0).
    pub offset: Option<i64>,
}

impl From<BlackHole> for BlackHoleRead {
    fn from(b: BlackHole) -> Self {
        Self {
            id: b.id,
            name: b.name,
            distance_ly: b.distance_ly,
            mass_solar: b.mass_solar,
            description: b.description,
        }
    }
}

impl From<BlackHoleCreate> for NewBlackHole {
    fn from(req: BlackHoleCreate) -> Self {
        Self {
            name: req.name,
            distance_ly: req.distance_ly,
            mass_solar: req.mass_solar,
            description: req.description,
        }
    }
}
