use std::sync::{Mutex, MutexGuard, PoisonError};

use tilepad_core::{
    config::{ConfigError, ViewSettings},
    map::{LayerError, TileSourceError},
    popup::PopupContent,
    view::{BasicMapSnapshot, ClickPopupSnapshot, LayerSwitcherSnapshot, ViewError},
};

use crate::engine::CoordinateRecord;

pub mod map;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MapError {
    #[error("{0}")]
    Engine(String),
    #[error("{0}")]
    View(String),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Style(String),
}

impl From<ViewError> for MapError {
    fn from(error: ViewError) -> Self {
        match error {
            ViewError::Engine(error) => MapError::Engine(error.to_string()),
            error => MapError::View(error.to_string()),
        }
    }
}

impl From<ConfigError> for MapError {
    fn from(error: ConfigError) -> Self {
        MapError::Config(error.to_string())
    }
}

impl From<LayerError> for MapError {
    fn from(error: LayerError) -> Self {
        MapError::View(error.to_string())
    }
}

impl From<TileSourceError> for MapError {
    fn from(error: TileSourceError) -> Self {
        MapError::Style(error.to_string())
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for MapError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        MapError::Engine(error.reason)
    }
}

/// Settings sent by the host, or the defaults when it sends none.
pub(crate) fn parse_settings(json: Option<String>) -> Result<ViewSettings, MapError> {
    Ok(match json {
        Some(json) => ViewSettings::from_json(&json)?,
        None => ViewSettings::default(),
    })
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct PopupRecord {
    pub heading: Option<String>,
    pub hdms: Option<String>,
    pub overlay_registered: bool,
    pub overlay_position: Option<CoordinateRecord>,
}

impl PopupRecord {
    fn new(
        content: &PopupContent,
        overlay_registered: bool,
        overlay_position: Option<geo::Coord>,
    ) -> Self {
        Self {
            heading: content.heading().map(str::to_owned),
            hdms: content.hdms().map(str::to_owned),
            overlay_registered,
            overlay_position: overlay_position.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct BasicMapRecord {
    pub target: String,
    pub mounted: bool,
}

impl From<BasicMapSnapshot> for BasicMapRecord {
    fn from(snapshot: BasicMapSnapshot) -> Self {
        Self {
            target: snapshot.target.to_string(),
            mounted: snapshot.mounted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ClickPopupRecord {
    pub target: String,
    pub mounted: bool,
    pub popup: PopupRecord,
}

impl From<ClickPopupSnapshot> for ClickPopupRecord {
    fn from(snapshot: ClickPopupSnapshot) -> Self {
        Self {
            target: snapshot.target.to_string(),
            mounted: snapshot.mounted,
            popup: PopupRecord::new(
                &snapshot.popup,
                snapshot.overlay_registered,
                snapshot.overlay_position,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct RadioOptionRecord {
    pub title: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct LayerSwitcherRecord {
    pub target: String,
    pub mounted: bool,
    pub popup: PopupRecord,
    pub drawer_open: bool,
    pub drawer_direction: String,
    pub toggle_glyph: String,
    pub radio_options: Vec<RadioOptionRecord>,
    pub current_layer: String,
}

impl From<LayerSwitcherSnapshot> for LayerSwitcherRecord {
    fn from(snapshot: LayerSwitcherSnapshot) -> Self {
        Self {
            target: snapshot.target.to_string(),
            mounted: snapshot.mounted,
            popup: PopupRecord::new(
                &snapshot.popup,
                snapshot.overlay_registered,
                snapshot.overlay_position,
            ),
            drawer_open: snapshot.drawer.open,
            drawer_direction: snapshot.drawer.direction.to_string(),
            toggle_glyph: snapshot.toggle_glyph.to_owned(),
            radio_options: snapshot
                .radio_options
                .into_iter()
                .map(|option| RadioOptionRecord {
                    title: option.title.to_string(),
                    checked: option.checked,
                })
                .collect(),
            current_layer: snapshot.current_layer.to_string(),
        }
    }
}
