use serde::{Deserialize, Serialize};

/// Open/closed state of the side drawer. Starts closed and only changes on a toggle
/// press or the drawer's own close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    pub fn toggle(self) -> Self {
        match self {
            DrawerState::Closed => DrawerState::Open,
            DrawerState::Open => DrawerState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == DrawerState::Open
    }

    /// Glyph on the floating toggle button.
    pub fn glyph(self) -> &'static str {
        match self {
            DrawerState::Closed => ">",
            DrawerState::Open => "<",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DrawerDirection {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

/// What the host's drawer widget is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerProps {
    pub open: bool,
    pub direction: DrawerDirection,
}
