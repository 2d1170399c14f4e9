//! The click popup: a container element carried by an overlay, a closer link and a
//! content area.

use crate::dom::ElementRef;

pub const POPUP_HEADING: &str = "You clicked here:";

/// What the content element shows. Replaced wholesale on every click.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupContent {
    #[default]
    Empty,
    Clicked {
        hdms: String,
    },
}

impl PopupContent {
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            PopupContent::Empty => None,
            PopupContent::Clicked { .. } => Some(POPUP_HEADING),
        }
    }

    pub fn hdms(&self) -> Option<&str> {
        match self {
            PopupContent::Empty => None,
            PopupContent::Clicked { hdms } => Some(hdms),
        }
    }
}

/// Host-side elements of the popup.
#[derive(Debug, Clone, Default)]
pub struct PopupElements {
    pub container: ElementRef,
    pub closer: ElementRef,
}

impl PopupElements {
    // The closer has no handler attached, so pressing it leaves the popup as it is.
    // TODO: hide the popup (clear the overlay position) once the closer gets wired up.
    pub fn press_closer(&self) {
        tracing::debug!(
            closer = ?self.closer.current(),
            "popup closer pressed; no handler attached"
        );
    }
}
