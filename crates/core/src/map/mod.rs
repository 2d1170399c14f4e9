pub mod catalog;
pub mod layer;
pub mod source;

pub use catalog::LayerCatalog;
pub use layer::{LayerError, LayerGroup, LayerTitle, TileLayer, VisibilityAssignment, select_layer};
pub use source::{TileSource, TileSourceError};
