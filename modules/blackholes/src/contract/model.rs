/// A catalogued black hole.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackHole {
    pub id: i32,
    pub name: String,
    /// Distance from Earth in light years.
    pub distance_ly: Option<f64>,
    /// Mass in solar masses.
    pub mass_solar: Option<f64>,
    pub description: Option<String>,
}

/// Data for a new catalog entry; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBlackHole {
    pub name: String,
    pub distance_ly: Option<f64>,
    pub mass_solar: Option<f64>,
    pub description: Option<String>,
}
