// Módulo de mapas: trait de la capa de marcadores + implementación Leaflet

pub mod traits;
pub mod leaflet;

pub use traits::*;
pub use leaflet::{LeafletMarkerLayer, MapView, PopupFactory};
