//! View objects handed to the host UI.
//!
//! Each object wraps one core view. The host creates it when its screen is built,
//! calls `mount` once the map container exists and `unmount` when it is torn down;
//! everything in between is forwarded user input plus `snapshot` for rendering.
//!
//! The view lock is never held while the host creates or detaches a map, so the
//! host may read the object back (`snapshot`, `get_style`) from those callbacks.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tilepad_core::{
    engine::MapClick,
    map::{LayerError, LayerTitle},
    view::{
        BasicMapView, ClickPopupView, LayerSwitcherView, PopupView, View, ViewError,
        create_binding,
    },
};

use crate::{
    engine::{CoordinateRecord, ForeignEngine, HostMapEngine},
    state::view::{
        BasicMapRecord, ClickPopupRecord, LayerSwitcherRecord, MapError, lock, parse_settings,
    },
};

mod style;

fn mount_view<V: View>(view: &Mutex<V>, engine: Arc<dyn HostMapEngine>) -> Result<(), MapError> {
    let options = lock(view).mount_options()?;
    let binding = create_binding(&mut ForeignEngine(engine), &options)?;

    // Another mount finished while the host was busy; keep that one.
    let attached = lock(view).attach(&options, binding);
    if let Err(mut binding) = attached {
        binding.detach();
        return Err(ViewError::AlreadyMounted(binding.target().clone()).into());
    }

    Ok(())
}

fn unmount_view<V: View>(view: &Mutex<V>) -> bool {
    let released = lock(view).release();
    released.is_some_and(|mut binding| binding.detach())
}

fn set_popup_container<V: PopupView>(view: &Mutex<V>, element: Option<String>) {
    let mut view = lock(view);
    let container = &mut view.popup_elements_mut().container;
    match element {
        Some(element) => container.attach(element),
        None => container.detach(),
    }
}

fn set_popup_closer<V: PopupView>(view: &Mutex<V>, element: Option<String>) {
    let mut view = lock(view);
    let closer = &mut view.popup_elements_mut().closer;
    match element {
        Some(element) => closer.attach(element),
        None => closer.detach(),
    }
}

fn single_click<V: PopupView>(
    view: &Mutex<V>,
    coordinate: CoordinateRecord,
) -> Result<(), MapError> {
    lock(view).handle_click(MapClick {
        coordinate: coordinate.into(),
    })?;
    Ok(())
}

#[derive(uniffi::Object)]
pub struct BasicMap {
    view: Mutex<BasicMapView>,
}

#[uniffi::export]
impl BasicMap {
    #[uniffi::constructor]
    pub fn new(settings_json: Option<String>) -> Result<Arc<Self>, MapError> {
        Ok(Arc::new(Self {
            view: Mutex::new(BasicMapView::new(parse_settings(settings_json)?)),
        }))
    }

    pub fn mount(&self, engine: Arc<dyn HostMapEngine>) -> Result<(), MapError> {
        mount_view(&self.view, engine)
    }

    pub fn unmount(&self) -> bool {
        unmount_view(&self.view)
    }

    pub fn snapshot(&self) -> BasicMapRecord {
        lock(&self.view).render().into()
    }

    pub fn get_style(&self) -> Result<String, MapError> {
        let options = lock(&self.view).map_options();
        style::build_style("basic", &options)
    }
}

#[derive(uniffi::Object)]
pub struct ClickPopupMap {
    view: Mutex<ClickPopupView>,
}

#[uniffi::export]
impl ClickPopupMap {
    #[uniffi::constructor]
    pub fn new(settings_json: Option<String>) -> Result<Arc<Self>, MapError> {
        Ok(Arc::new(Self {
            view: Mutex::new(ClickPopupView::new(parse_settings(settings_json)?)),
        }))
    }

    /// Points the popup at a different container, or `None` when the host has not
    /// laid it out yet. Takes effect at the next mount.
    pub fn set_popup_container(&self, element: Option<String>) {
        set_popup_container(&self.view, element);
    }

    pub fn set_popup_closer(&self, element: Option<String>) {
        set_popup_closer(&self.view, element);
    }

    pub fn mount(&self, engine: Arc<dyn HostMapEngine>) -> Result<(), MapError> {
        mount_view(&self.view, engine)
    }

    pub fn unmount(&self) -> bool {
        unmount_view(&self.view)
    }

    /// A primary single click at `coordinate`, in projected metres.
    pub fn on_single_click(&self, coordinate: CoordinateRecord) -> Result<(), MapError> {
        single_click(&self.view, coordinate)
    }

    pub fn press_popup_closer(&self) {
        lock(&self.view).press_popup_closer();
    }

    pub fn snapshot(&self) -> ClickPopupRecord {
        lock(&self.view).render().into()
    }

    pub fn get_style(&self) -> Result<String, MapError> {
        let options = lock(&self.view).map_options();
        style::build_style("click-popup", &options)
    }
}

#[derive(uniffi::Object)]
pub struct LayerSwitcherMap {
    view: Mutex<LayerSwitcherView>,
}

#[uniffi::export]
impl LayerSwitcherMap {
    #[uniffi::constructor]
    pub fn new(settings_json: Option<String>) -> Result<Arc<Self>, MapError> {
        Ok(Arc::new(Self {
            view: Mutex::new(LayerSwitcherView::new(parse_settings(settings_json)?)?),
        }))
    }

    pub fn set_popup_container(&self, element: Option<String>) {
        set_popup_container(&self.view, element);
    }

    pub fn set_popup_closer(&self, element: Option<String>) {
        set_popup_closer(&self.view, element);
    }

    pub fn mount(&self, engine: Arc<dyn HostMapEngine>) -> Result<(), MapError> {
        mount_view(&self.view, engine)
    }

    pub fn unmount(&self) -> bool {
        unmount_view(&self.view)
    }

    pub fn on_single_click(&self, coordinate: CoordinateRecord) -> Result<(), MapError> {
        single_click(&self.view, coordinate)
    }

    pub fn press_popup_closer(&self) {
        lock(&self.view).press_popup_closer();
    }

    pub fn toggle_drawer(&self) {
        lock(&self.view).toggle_drawer();
    }

    pub fn close_drawer(&self) {
        lock(&self.view).close_drawer();
    }

    /// Selects a radio option by its title, e.g. `"humanitarian"`.
    pub fn select_layer(&self, title: String) -> Result<(), MapError> {
        let title = LayerTitle::from_str(&title).map_err(|_| LayerError::UnknownLayer(title))?;
        lock(&self.view).select_layer(title)?;
        Ok(())
    }

    pub fn snapshot(&self) -> LayerSwitcherRecord {
        lock(&self.view).render().into()
    }

    pub fn get_style(&self) -> Result<String, MapError> {
        let options = lock(&self.view).map_options();
        style::build_style("layer-switcher", &options)
    }
}
