use geo::Coord;
use tracing::{debug, warn};

use crate::{
    config::ViewSettings,
    coord::{to_lon_lat, to_string_hdms},
    dom::{ElementRef, TargetId},
    engine::{MapClick, MapHandle, MapLayer, MapOptions},
    lifecycle::MapBinding,
    map::{catalog::LayerCatalog, layer::LayerTitle},
    overlay::{AutoPan, Overlay, OverlayOptions},
    popup::{PopupContent, PopupElements},
    view::{PopupView, View, ViewError, ensure_unmounted, store},
};

pub const DEFAULT_TARGET: &str = "markerpopupmap";
pub const POPUP_ELEMENT: &str = "popup";
pub const POPUP_CLOSER_ELEMENT: &str = "popup-closer";

/// The mounted map plus the popup state shared by every view that shows clicked
/// coordinates.
#[derive(Debug)]
pub(crate) struct ClickPopup {
    elements: PopupElements,
    auto_pan: AutoPan,
    fraction_digits: usize,
    content: PopupContent,
    overlay: Option<Overlay>,
    binding: Option<MapBinding>,
}

impl ClickPopup {
    pub(crate) fn new(settings: &ViewSettings) -> Self {
        Self {
            elements: PopupElements {
                container: ElementRef::attached(POPUP_ELEMENT),
                closer: ElementRef::attached(POPUP_CLOSER_ELEMENT),
            },
            auto_pan: settings.auto_pan(),
            fraction_digits: settings.hdms_fraction_digits,
            content: PopupContent::Empty,
            overlay: None,
            binding: None,
        }
    }

    pub(crate) fn elements_mut(&mut self) -> &mut PopupElements {
        &mut self.elements
    }

    pub(crate) fn press_closer(&self) {
        self.elements.press_closer();
    }

    /// `base` plus the popup overlay. A container that is not attached yet means no
    /// overlay at all, and the popup stays hidden until the next mount.
    pub(crate) fn mount_options(&self, base: MapOptions) -> Result<MapOptions, ViewError> {
        ensure_unmounted(&self.binding)?;

        let overlay = match self.elements.container.current() {
            Some(element) => Some(OverlayOptions {
                element: element.clone(),
                auto_pan: Some(self.auto_pan),
            }),
            None => {
                warn!("popup container is not attached; clicks will not show a popup on this mount");
                None
            }
        };

        Ok(MapOptions {
            overlays: overlay.into_iter().collect(),
            ..base
        })
    }

    pub(crate) fn attach(
        &mut self,
        options: &MapOptions,
        binding: MapBinding,
    ) -> Result<(), MapBinding> {
        store(&mut self.binding, binding)?;
        self.overlay = options.overlays.first().cloned().map(Overlay::new);
        Ok(())
    }

    pub(crate) fn release(&mut self) -> Option<MapBinding> {
        self.overlay = None;
        self.binding.take()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn handle_mut(&mut self) -> Option<&mut (dyn MapHandle + 'static)> {
        self.binding.as_mut().and_then(MapBinding::handle_mut)
    }

    pub(crate) fn on_click(&mut self, click: &MapClick) -> Result<(), ViewError> {
        let handle = self
            .binding
            .as_mut()
            .and_then(MapBinding::handle_mut)
            .ok_or(ViewError::NotMounted)?;

        let hdms = to_string_hdms(to_lon_lat(click.coordinate), self.fraction_digits);
        debug!(%hdms, "map clicked");
        self.content = PopupContent::Clicked { hdms };

        if let Some(overlay) = &mut self.overlay {
            overlay.set_position(Some(click.coordinate));
            handle.set_overlay_position(overlay.element(), Some(click.coordinate));
        }
        Ok(())
    }

    pub(crate) fn content(&self) -> &PopupContent {
        &self.content
    }

    pub(crate) fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }
}

/// What the host renders for a [`ClickPopupView`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClickPopupSnapshot {
    pub target: TargetId,
    pub mounted: bool,
    pub popup: PopupContent,
    pub overlay_registered: bool,
    pub overlay_position: Option<Coord>,
}

/// A map that shows the clicked position in a popup.
#[derive(Debug)]
pub struct ClickPopupView {
    settings: ViewSettings,
    popup: ClickPopup,
}

impl ClickPopupView {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            popup: ClickPopup::new(&settings),
            settings,
        }
    }

    pub fn target(&self) -> TargetId {
        self.settings.target_or(DEFAULT_TARGET)
    }

    /// The map this view creates at mount, without the popup overlay.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            target: self.target(),
            view: self.settings.view_options(),
            layers: vec![MapLayer::Tile(LayerCatalog::layer(
                LayerTitle::NaturalEarth,
                true,
            ))],
            overlays: Vec::new(),
        }
    }

    pub fn render(&self) -> ClickPopupSnapshot {
        ClickPopupSnapshot {
            target: self.target(),
            mounted: self.is_mounted(),
            popup: self.popup.content().clone(),
            overlay_registered: self.popup.overlay().is_some(),
            overlay_position: self.popup.overlay().and_then(Overlay::position),
        }
    }
}

impl View for ClickPopupView {
    fn mount_options(&self) -> Result<MapOptions, ViewError> {
        self.popup.mount_options(self.map_options())
    }

    fn attach(&mut self, options: &MapOptions, binding: MapBinding) -> Result<(), MapBinding> {
        self.popup.attach(options, binding)
    }

    fn release(&mut self) -> Option<MapBinding> {
        self.popup.release()
    }

    fn is_mounted(&self) -> bool {
        self.popup.is_mounted()
    }
}

impl PopupView for ClickPopupView {
    fn popup_elements_mut(&mut self) -> &mut PopupElements {
        self.popup.elements_mut()
    }

    fn handle_click(&mut self, click: MapClick) -> Result<(), ViewError> {
        self.popup.on_click(&click)
    }

    fn press_popup_closer(&self) {
        self.popup.press_closer();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        coord::from_lon_lat,
        dom::ElementId,
        headless::{DEFAULT_VIEWPORT, HeadlessEngine},
        view::create_binding,
    };

    fn mounted() -> (HeadlessEngine, ClickPopupView) {
        let mut engine = HeadlessEngine::default();
        let mut view = ClickPopupView::new(ViewSettings::default());
        view.mount(&mut engine).unwrap();
        (engine, view)
    }

    fn click_at(coordinate: Coord) -> MapClick {
        MapClick { coordinate }
    }

    #[test]
    fn starts_with_empty_popup() {
        let (engine, view) = mounted();
        let snapshot = view.render();

        assert_eq!(snapshot.popup, PopupContent::Empty);
        assert!(snapshot.overlay_registered);
        assert_eq!(snapshot.overlay_position, None);

        let map = engine.bound_map(&view.target()).unwrap();
        assert_eq!(map.layer_visible(LayerTitle::NaturalEarth), Some(true));
        assert_eq!(map.overlays.len(), 1);
    }

    #[test]
    fn click_at_origin_shows_null_island() {
        let (engine, mut view) = mounted();
        let origin = Coord { x: 0.0, y: 0.0 };

        view.handle_click(click_at(origin)).unwrap();

        let snapshot = view.render();
        assert_eq!(snapshot.popup.hdms(), Some("0° 0°"));
        assert_eq!(snapshot.overlay_position, Some(origin));

        let map = engine.bound_map(&view.target()).unwrap();
        assert_eq!(
            map.overlay_position(&ElementId::new(POPUP_ELEMENT)),
            Some(origin)
        );
    }

    #[test]
    fn every_click_moves_the_overlay() {
        let (engine, mut view) = mounted();

        for lon_lat in [
            Coord { x: 2.2945, y: 48.8584 },
            Coord { x: -74.0060, y: 40.7128 },
            Coord { x: 151.2153, y: -33.8568 },
        ] {
            let coordinate = from_lon_lat(lon_lat);
            view.handle_click(click_at(coordinate)).unwrap();

            let snapshot = view.render();
            assert!(!snapshot.popup.hdms().unwrap().is_empty());

            let position = engine
                .bound_map(&view.target())
                .unwrap()
                .overlay_position(&ElementId::new(POPUP_ELEMENT))
                .unwrap();
            assert_relative_eq!(position.x, coordinate.x);
            assert_relative_eq!(position.y, coordinate.y);
        }

        assert_eq!(
            view.render().popup.hdms(),
            Some("33° 51′ 24″ S 151° 12′ 55″ E")
        );
    }

    #[test]
    fn headless_click_through_the_viewport() {
        let (engine, mut view) = mounted();

        let click = engine.click(&view.target(), DEFAULT_VIEWPORT / 2.0).unwrap();
        view.handle_click(click).unwrap();

        assert_eq!(view.render().popup.hdms(), Some("0° 0°"));
    }

    #[test]
    fn unattached_container_skips_overlay() {
        let mut engine = HeadlessEngine::default();
        let mut view = ClickPopupView::new(ViewSettings::default());
        view.popup_elements_mut().container.detach();
        view.mount(&mut engine).unwrap();

        view.handle_click(click_at(Coord { x: 0.0, y: 0.0 })).unwrap();

        let snapshot = view.render();
        assert_eq!(snapshot.popup.hdms(), Some("0° 0°"));
        assert!(!snapshot.overlay_registered);
        assert_eq!(snapshot.overlay_position, None);
        assert!(engine.bound_map(&view.target()).unwrap().overlays.is_empty());
    }

    #[test]
    fn closer_does_nothing() {
        let (_engine, mut view) = mounted();
        view.handle_click(click_at(Coord { x: 0.0, y: 0.0 })).unwrap();
        let before = view.render();

        view.press_popup_closer();

        assert_eq!(view.render(), before);
    }

    #[test]
    fn unmount_releases_once_and_allows_remount() {
        let (mut engine, mut view) = mounted();

        assert!(view.unmount());
        assert!(!view.unmount());
        assert_eq!(engine.releases(), 1);
        assert_eq!(engine.bound_targets(), 0);

        view.mount(&mut engine).unwrap();
        assert_eq!(engine.bound_targets(), 1);
        assert_eq!(engine.maps_created(), 2);
    }

    #[test]
    fn mounting_twice_is_rejected() {
        let (mut engine, mut view) = mounted();

        assert!(matches!(
            view.mount(&mut engine),
            Err(ViewError::AlreadyMounted(_))
        ));
        assert_eq!(engine.maps_created(), 1);
    }

    #[test]
    fn click_before_mount_fails() {
        let mut view = ClickPopupView::new(ViewSettings::default());
        assert!(matches!(
            view.handle_click(click_at(Coord { x: 0.0, y: 0.0 })),
            Err(ViewError::NotMounted)
        ));
    }

    #[test]
    fn dropping_a_mounted_view_releases_target() {
        let (engine, view) = mounted();
        drop(view);

        assert_eq!(engine.releases(), 1);
        assert_eq!(engine.bound_targets(), 0);
    }

    #[test]
    fn attach_hands_back_a_second_binding() {
        let mut engine = HeadlessEngine::default();
        let mut view = ClickPopupView::new(ViewSettings::default());

        let options = view.mount_options().unwrap();
        let first = create_binding(&mut engine, &options).unwrap();
        view.attach(&options, first).unwrap();

        let settings = ViewSettings::from_json(r#"{ "target": "other" }"#).unwrap();
        let other = ClickPopupView::new(settings);
        let other_options = other.mount_options().unwrap();
        let second = create_binding(&mut engine, &other_options).unwrap();

        let mut rejected = view.attach(&other_options, second).unwrap_err();
        assert_eq!(rejected.target(), &TargetId::new("other"));
        assert!(rejected.detach());

        assert!(view.render().overlay_registered);
        assert_eq!(engine.bound_targets(), 1);
        assert_eq!(engine.releases(), 1);
    }

    #[test]
    fn release_keeps_the_map_bound_until_detached() {
        let (engine, mut view) = mounted();

        let mut binding = view.release().unwrap();
        assert!(!view.is_mounted());
        assert!(!view.render().overlay_registered);
        assert_eq!(engine.bound_targets(), 1);

        assert!(binding.detach());
        assert_eq!(engine.bound_targets(), 0);
    }
}
