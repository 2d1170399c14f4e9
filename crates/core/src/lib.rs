//! # tilepad-core
//!
//! Map views over an external tile engine: a plain OpenStreetMap map, a map that
//! shows the clicked position in a popup, and a map with a drawer for switching
//! between tile styles.
//!
//! The engine itself (tile fetching, drawing, gesture handling) lives behind
//! [`engine::MapEngine`]. Hosts implement it over their native map SDK;
//! [`headless::HeadlessEngine`] keeps everything in memory.
//!
//! ```
//! use tilepad_core::prelude::*;
//!
//! let mut engine = HeadlessEngine::default();
//! let mut view = LayerSwitcherView::new(ViewSettings::default()).unwrap();
//! view.mount(&mut engine).unwrap();
//!
//! view.toggle_drawer();
//! view.select_layer(LayerTitle::Humanitarian).unwrap();
//!
//! let snapshot = view.render();
//! assert!(snapshot.drawer.open);
//! assert_eq!(snapshot.current_layer, LayerTitle::Humanitarian);
//! ```

pub mod config;
pub mod coord;
pub mod dom;
pub mod drawer;
pub mod engine;
pub mod headless;
pub mod lifecycle;
pub mod map;
pub mod overlay;
pub mod popup;
pub mod view;

pub mod prelude {
    pub use crate::config::ViewSettings;
    pub use crate::dom::{ElementId, TargetId};
    pub use crate::engine::{MapClick, MapEngine, MapHandle, MapOptions};
    pub use crate::headless::HeadlessEngine;
    pub use crate::map::{LayerTitle, TileSource};
    pub use crate::view::{
        BasicMapView, ClickPopupView, LayerSwitcherView, PopupView, View, ViewError,
    };
}
