use serde_json::json;
use tilepad_core::{
    coord::{projection::TILE_SIZE, to_lon_lat},
    engine::{MapLayer, MapOptions},
    map::LayerCatalog,
};

use crate::state::view::MapError;

/// A MapLibre style (spec version 8) with one raster source and one raster layer
/// per tile layer. Hidden layers stay in the style with `visibility: none` so the
/// host can flip them without reloading.
pub(crate) fn build_style(name: &str, options: &MapOptions) -> Result<String, MapError> {
    let mut sources = serde_json::Map::new();
    let mut layers = Vec::new();

    for layer in options.layers.iter().flat_map(MapLayer::tiles) {
        let id = layer.title.to_string();

        sources.insert(
            id.clone(),
            json!({
                "type": "raster",
                "tiles": layer.source.xyz_templates()?,
                "tileSize": (TILE_SIZE as u32),
                "attribution": LayerCatalog::attribution(layer.title),
            }),
        );
        layers.push(json!({
            "id": id,
            "type": "raster",
            "source": id,
            "layout": {
                "visibility": (if layer.visible { "visible" } else { "none" }),
            },
        }));
    }

    let center = to_lon_lat(options.view.center);
    let style = json!({
        "version": 8,
        "name": name,
        "center": [center.x, center.y],
        "zoom": options.view.zoom,
        "sources": sources,
        "layers": layers,
    });

    serde_json::to_string(&style).map_err(|e| MapError::Style(e.to_string()))
}
