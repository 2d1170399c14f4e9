//! The seam between views and the mapping engine that actually draws tiles.
//!
//! Engines own tile fetching, projection of the viewport and event dispatch. Views
//! hand them a fully described map once at mount and afterwards only flip layer
//! visibility, move overlays and clear the target.

use geo::Coord;

use crate::{
    dom::{ElementId, TargetId},
    map::layer::{LayerGroup, LayerTitle, TileLayer},
    overlay::OverlayOptions,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("target {0} is already bound to a map")]
    TargetInUse(TargetId),
    #[error("{0}")]
    Host(String),
}

/// Initial view, center in projected (Web Mercator) metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub center: Coord,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapLayer {
    Tile(TileLayer),
    Group(LayerGroup),
}

impl MapLayer {
    /// Every tile layer, groups flattened in order.
    pub fn tiles(&self) -> Vec<&TileLayer> {
        match self {
            MapLayer::Tile(layer) => vec![layer],
            MapLayer::Group(group) => group.layers().iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub target: TargetId,
    pub view: ViewOptions,
    pub layers: Vec<MapLayer>,
    pub overlays: Vec<OverlayOptions>,
}

/// A primary single click on the map surface, in projected metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub coordinate: Coord,
}

pub trait MapEngine {
    fn create_map(&mut self, options: MapOptions) -> Result<Box<dyn MapHandle>, EngineError>;
}

/// A live map created by an engine.
pub trait MapHandle: Send {
    fn set_layer_visibility(&mut self, title: LayerTitle, visible: bool);
    fn set_overlay_position(&mut self, element: &ElementId, position: Option<Coord>);
    /// `None` detaches the map from its element and releases what the engine bound to it.
    fn set_target(&mut self, target: Option<&TargetId>);
}
