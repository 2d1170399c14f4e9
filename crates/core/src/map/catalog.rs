//! The built-in tile sources. The table is immutable; every view builds its own
//! layers from it so visibility is never shared between mounted views.

use crate::map::{
    layer::{LayerTitle, TileLayer},
    source::{CrossOrigin, TileSource},
};

pub const OSM_STANDARD_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_HUMANITARIAN_URL: &str = "https://{a-c}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const NATURAL_EARTH_URL: &str = "https://maps.gnosis.earth/ogcapi/collections/NaturalEarth:raster:HYP_HR_SR_OB_DR/map/tiles/WebMercatorQuad";

pub struct LayerCatalog;

impl LayerCatalog {
    pub fn source(title: LayerTitle) -> TileSource {
        match title {
            LayerTitle::Standard => TileSource::xyz(OSM_STANDARD_URL),
            LayerTitle::Humanitarian => TileSource::xyz(OSM_HUMANITARIAN_URL),
            LayerTitle::NaturalEarth => {
                TileSource::ogc_map_tile(NATURAL_EARTH_URL, Some(CrossOrigin::Anonymous))
            }
        }
    }

    pub fn attribution(title: LayerTitle) -> &'static str {
        match title {
            LayerTitle::Standard => "© OpenStreetMap contributors",
            LayerTitle::Humanitarian => {
                "© OpenStreetMap contributors, tiles style by Humanitarian OpenStreetMap Team"
            }
            LayerTitle::NaturalEarth => "Made with Natural Earth",
        }
    }

    pub fn layer(title: LayerTitle, visible: bool) -> TileLayer {
        TileLayer {
            title,
            source: Self::source(title),
            visible,
        }
    }
}
