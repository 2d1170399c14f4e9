use std::time::Duration;

use geo::Coord;

use crate::dom::ElementId;

pub const DEFAULT_AUTO_PAN_DURATION: Duration = Duration::from_millis(250);

/// Pan the map so a revealed overlay is fully visible, animating over `animation_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPan {
    pub animation_duration: Duration,
}

impl Default for AutoPan {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_AUTO_PAN_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub element: ElementId,
    pub auto_pan: Option<AutoPan>,
}

/// An element placed in map coordinates. Unpositioned overlays are hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    options: OverlayOptions,
    position: Option<Coord>,
}

impl Overlay {
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            options,
            position: None,
        }
    }

    pub fn element(&self) -> &ElementId {
        &self.options.element
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn position(&self) -> Option<Coord> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Coord>) {
        self.position = position;
    }
}
