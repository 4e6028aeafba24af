pub mod model;

pub use model::{BlackHole, NewBlackHole};
