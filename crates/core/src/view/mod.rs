//! The three map views.
//!
//! A view is constructed once by the host, mounted when its container exists and
//! unmounted when the container goes away. Mounting creates the engine map; every
//! later event only touches that one map. Unmounting is idempotent and also happens
//! when the view is dropped.
//!
//! Mounting is split into [`View::mount_options`], the engine call and
//! [`View::attach`], and unmounting into [`View::release`] and
//! [`MapBinding::detach`]. Callers that keep a view behind a lock use the split form
//! so the engine is never called with the lock held.

use tracing::info;

use crate::{
    dom::TargetId,
    engine::{EngineError, MapClick, MapEngine, MapOptions},
    lifecycle::MapBinding,
    map::layer::LayerError,
    popup::PopupElements,
};

pub mod basic;
pub mod click_popup;
pub mod layer_switcher;

pub use basic::{BasicMapSnapshot, BasicMapView};
pub use click_popup::{ClickPopupSnapshot, ClickPopupView};
pub use layer_switcher::{LayerSwitcherSnapshot, LayerSwitcherView, RadioOption};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view is already mounted on {0}")]
    AlreadyMounted(TargetId),
    #[error("view is not mounted")]
    NotMounted,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Layer(#[from] LayerError),
}

pub trait View {
    /// The map to create at mount. Fails if the view is already mounted.
    fn mount_options(&self) -> Result<MapOptions, ViewError>;

    /// Takes ownership of a map created from `options`. A view that was mounted in
    /// the meantime hands the binding back untouched.
    fn attach(&mut self, options: &MapOptions, binding: MapBinding) -> Result<(), MapBinding>;

    /// Gives up the mounted map without detaching it.
    fn release(&mut self) -> Option<MapBinding>;

    fn is_mounted(&self) -> bool;

    /// Creates the engine map. Fails if the view is already mounted.
    fn mount(&mut self, engine: &mut dyn MapEngine) -> Result<(), ViewError> {
        let options = self.mount_options()?;
        let binding = create_binding(engine, &options)?;

        self.attach(&options, binding)
            .map_err(|binding| ViewError::AlreadyMounted(binding.target().clone()))
    }

    /// Detaches the map from its target. Returns whether anything was released.
    fn unmount(&mut self) -> bool {
        self.release().is_some_and(|mut binding| binding.detach())
    }
}

/// Views that show the clicked position in a popup.
pub trait PopupView: View {
    /// Lets the host attach, replace or detach the popup elements before mounting.
    fn popup_elements_mut(&mut self) -> &mut PopupElements;

    fn handle_click(&mut self, click: MapClick) -> Result<(), ViewError>;

    fn press_popup_closer(&self);
}

/// Asks `engine` for the map described by `options`.
pub fn create_binding(
    engine: &mut dyn MapEngine,
    options: &MapOptions,
) -> Result<MapBinding, ViewError> {
    let handle = engine.create_map(options.clone())?;
    info!(element = %options.target, "mounted map");

    Ok(MapBinding::new(options.target.clone(), handle))
}

fn ensure_unmounted(slot: &Option<MapBinding>) -> Result<(), ViewError> {
    match slot {
        Some(binding) => Err(ViewError::AlreadyMounted(binding.target().clone())),
        None => Ok(()),
    }
}

fn store(slot: &mut Option<MapBinding>, binding: MapBinding) -> Result<(), MapBinding> {
    if slot.is_some() {
        return Err(binding);
    }

    *slot = Some(binding);
    Ok(())
}
