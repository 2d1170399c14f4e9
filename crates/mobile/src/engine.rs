//! The native map SDK as seen from Rust.
//!
//! Kotlin/Swift implement [`HostMapEngine`] and [`HostMap`] over MapLibre (or any
//! other engine); [`ForeignEngine`] adapts them to the core engine traits so the
//! views never know which side of the FFI boundary draws the tiles.

use std::sync::Arc;

use geo::Coord;
use tilepad_core::{
    coord::projection::TILE_SIZE,
    dom::{ElementId, TargetId},
    engine::{EngineError, MapEngine, MapHandle, MapLayer, MapOptions},
    map::{LayerCatalog, LayerTitle, TileSourceError, source::CrossOrigin},
};

use crate::state::view::MapError;

/// Projected (Web Mercator) metres.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct CoordinateRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Coord> for CoordinateRecord {
    fn from(coordinate: Coord) -> Self {
        Self {
            x: coordinate.x,
            y: coordinate.y,
        }
    }
}

impl From<CoordinateRecord> for Coord {
    fn from(record: CoordinateRecord) -> Self {
        Coord {
            x: record.x,
            y: record.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TileLayerRecord {
    pub title: String,
    /// `{z}/{x}/{y}` templates, one per mirror host.
    pub tiles: Vec<String>,
    pub tile_size: u32,
    pub attribution: String,
    pub cross_origin: Option<String>,
    pub visible: bool,
    /// Layers sharing a group are switched together by the drawer.
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct OverlayRecord {
    pub element: String,
    pub auto_pan_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MapOptionsRecord {
    pub target: String,
    pub center: CoordinateRecord,
    pub zoom: f64,
    pub layers: Vec<TileLayerRecord>,
    pub overlays: Vec<OverlayRecord>,
}

pub const BASE_LAYER_GROUP: &str = "base-layers";

impl TryFrom<&MapOptions> for MapOptionsRecord {
    type Error = TileSourceError;

    fn try_from(options: &MapOptions) -> Result<Self, Self::Error> {
        let mut layers = Vec::new();

        for layer in &options.layers {
            let group = matches!(layer, MapLayer::Group(_)).then(|| BASE_LAYER_GROUP.to_owned());

            for tile in layer.tiles() {
                layers.push(TileLayerRecord {
                    title: tile.title.to_string(),
                    tiles: tile.source.xyz_templates()?,
                    tile_size: TILE_SIZE as u32,
                    attribution: LayerCatalog::attribution(tile.title).to_owned(),
                    cross_origin: tile.source.cross_origin().map(|mode| {
                        match mode {
                            CrossOrigin::Anonymous => "anonymous",
                            CrossOrigin::UseCredentials => "use-credentials",
                        }
                        .to_owned()
                    }),
                    visible: tile.visible,
                    group: group.clone(),
                });
            }
        }

        Ok(Self {
            target: options.target.to_string(),
            center: options.view.center.into(),
            zoom: options.view.zoom,
            layers,
            overlays: options
                .overlays
                .iter()
                .map(|overlay| OverlayRecord {
                    element: overlay.element.to_string(),
                    auto_pan_duration_ms: overlay
                        .auto_pan
                        .map(|auto_pan| auto_pan.animation_duration.as_millis() as u64),
                })
                .collect(),
        })
    }
}

/// Implemented by the host over its map SDK.
///
/// `create_map` runs without any view locked, so it may call back into the view
/// object that is mounting.
#[uniffi::export(with_foreign)]
pub trait HostMapEngine: Send + Sync {
    /// Creates a map bound to `options.target`.
    fn create_map(&self, options: MapOptionsRecord) -> Result<Arc<dyn HostMap>, MapError>;
}

/// One map created by [`HostMapEngine::create_map`].
///
/// `set_target(None)` runs without any view locked. Visibility and overlay updates
/// arrive while the view handling the user input is locked; they must not call back
/// into that view on the same thread.
#[uniffi::export(with_foreign)]
pub trait HostMap: Send + Sync {
    fn set_layer_visibility(&self, title: String, visible: bool);
    fn set_overlay_position(&self, element: String, position: Option<CoordinateRecord>);
    /// `None` detaches the map from its view and frees the native resources.
    fn set_target(&self, target: Option<String>);
}

pub(crate) struct ForeignEngine(pub(crate) Arc<dyn HostMapEngine>);

impl MapEngine for ForeignEngine {
    fn create_map(&mut self, options: MapOptions) -> Result<Box<dyn MapHandle>, EngineError> {
        let record =
            MapOptionsRecord::try_from(&options).map_err(|e| EngineError::Host(e.to_string()))?;
        let map = self
            .0
            .create_map(record)
            .map_err(|e| EngineError::Host(e.to_string()))?;

        Ok(Box::new(ForeignMap(map)))
    }
}

struct ForeignMap(Arc<dyn HostMap>);

impl MapHandle for ForeignMap {
    fn set_layer_visibility(&mut self, title: LayerTitle, visible: bool) {
        self.0.set_layer_visibility(title.to_string(), visible);
    }

    fn set_overlay_position(&mut self, element: &ElementId, position: Option<Coord>) {
        self.0
            .set_overlay_position(element.to_string(), position.map(Into::into));
    }

    fn set_target(&mut self, target: Option<&TargetId>) {
        self.0.set_target(target.map(ToString::to_string));
    }
}
