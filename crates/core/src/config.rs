//! Per-view settings. Every field has a built-in default, so hosts only send what
//! they want to override, e.g. `{ "center": [2.35, 48.85], "zoom": 11 }`.

use std::time::Duration;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{
    coord::{hdms::MAX_FRACTION_DIGITS, projection::from_lon_lat},
    dom::TargetId,
    drawer::DrawerDirection,
    engine::ViewOptions,
    overlay::AutoPan,
};

pub const DEFAULT_ZOOM: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid view settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zoom {0} is outside 0..=28")]
    Zoom(f64),
    #[error("hdms_fraction_digits {0} is above {max}", max = MAX_FRACTION_DIGITS)]
    FractionDigits(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Element the map binds to. Each view has its own default.
    pub target: Option<String>,
    /// `[lon, lat]` in degrees.
    pub center: [f64; 2],
    pub zoom: f64,
    /// Decimal places of the seconds in the popup coordinate.
    pub hdms_fraction_digits: usize,
    pub auto_pan_ms: u64,
    pub drawer_direction: DrawerDirection,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            target: None,
            center: [0.0, 0.0],
            zoom: DEFAULT_ZOOM,
            hdms_fraction_digits: 0,
            auto_pan_ms: 250,
            drawer_direction: DrawerDirection::default(),
        }
    }
}

impl ViewSettings {
    /// Parses a settings object. Anything but a JSON object is rejected, so serde's
    /// positional (array) form of the struct is not accepted.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let settings: ViewSettings = serde_json::from_value(fields.into())?;

        if !(0.0..=28.0).contains(&settings.zoom) {
            return Err(ConfigError::Zoom(settings.zoom));
        }
        if settings.hdms_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::FractionDigits(settings.hdms_fraction_digits));
        }

        Ok(settings)
    }

    pub fn target_or(&self, default: &str) -> TargetId {
        TargetId::new(self.target.as_deref().unwrap_or(default))
    }

    pub fn view_options(&self) -> ViewOptions {
        let [lon, lat] = self.center;

        ViewOptions {
            center: from_lon_lat(Coord { x: lon, y: lat }),
            zoom: self.zoom,
        }
    }

    pub fn auto_pan(&self) -> AutoPan {
        AutoPan {
            animation_duration: Duration::from_millis(self.auto_pan_ms),
        }
    }
}
