use geo::Coord;
use tracing::debug;

use crate::{
    config::ViewSettings,
    dom::TargetId,
    drawer::{DrawerProps, DrawerState},
    engine::{MapClick, MapLayer, MapOptions},
    lifecycle::MapBinding,
    map::{
        catalog::LayerCatalog,
        layer::{LayerGroup, LayerTitle, VisibilityAssignment, select_layer},
    },
    overlay::Overlay,
    popup::{PopupContent, PopupElements},
    view::{PopupView, View, ViewError, click_popup::ClickPopup},
};

pub const DEFAULT_TARGET: &str = "layerswitchermap";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioOption {
    pub title: LayerTitle,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSwitcherSnapshot {
    pub target: TargetId,
    pub mounted: bool,
    pub popup: PopupContent,
    pub overlay_registered: bool,
    pub overlay_position: Option<Coord>,
    pub drawer: DrawerProps,
    pub toggle_glyph: &'static str,
    pub radio_options: Vec<RadioOption>,
    pub current_layer: LayerTitle,
}

/// The click popup map plus a drawer for switching between the standard and the
/// humanitarian OpenStreetMap styles.
///
/// `current_layer` mirrors the group's visibility. Both only change together in
/// [`LayerSwitcherView::select_layer`].
#[derive(Debug)]
pub struct LayerSwitcherView {
    settings: ViewSettings,
    popup: ClickPopup,
    group: LayerGroup,
    current_layer: LayerTitle,
    drawer: DrawerState,
}

impl LayerSwitcherView {
    pub fn new(settings: ViewSettings) -> Result<Self, ViewError> {
        let group = LayerGroup::new(vec![
            LayerCatalog::layer(LayerTitle::Standard, true),
            LayerCatalog::layer(LayerTitle::Humanitarian, false),
        ])?;

        Ok(Self {
            popup: ClickPopup::new(&settings),
            settings,
            group,
            current_layer: LayerTitle::Standard,
            drawer: DrawerState::default(),
        })
    }

    pub fn target(&self) -> TargetId {
        self.settings.target_or(DEFAULT_TARGET)
    }

    pub fn layer_group(&self) -> &LayerGroup {
        &self.group
    }

    pub fn current_layer(&self) -> LayerTitle {
        self.current_layer
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer = self.drawer.toggle();
        debug!(open = self.drawer.is_open(), "drawer toggled");
    }

    /// The drawer widget's own close request (backdrop click, escape).
    pub fn close_drawer(&mut self) {
        self.drawer = DrawerState::Closed;
    }

    /// Makes `title` the only visible layer. Works before mounting too; the engine then
    /// picks the flags up at mount.
    pub fn select_layer(&mut self, title: LayerTitle) -> Result<(), ViewError> {
        let assignment = select_layer(&self.group, title)?;
        self.apply(&assignment);
        Ok(())
    }

    fn apply(&mut self, assignment: &VisibilityAssignment) {
        self.group.apply(assignment);

        if let Some(handle) = self.popup.handle_mut() {
            for &(title, visible) in &assignment.visibility {
                handle.set_layer_visibility(title, visible);
            }
        }

        self.current_layer = assignment.selected;
        debug!(layer = %self.current_layer, "switched layer");
    }

    pub fn radio_options(&self) -> Vec<RadioOption> {
        self.group
            .titles()
            .map(|title| RadioOption {
                title,
                checked: title == self.current_layer,
            })
            .collect()
    }

    /// The map this view creates at mount, without the popup overlay. Layer flags
    /// reflect the current selection.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            target: self.target(),
            view: self.settings.view_options(),
            layers: vec![MapLayer::Group(self.group.clone())],
            overlays: Vec::new(),
        }
    }

    pub fn render(&self) -> LayerSwitcherSnapshot {
        LayerSwitcherSnapshot {
            target: self.target(),
            mounted: self.is_mounted(),
            popup: self.popup.content().clone(),
            overlay_registered: self.popup.overlay().is_some(),
            overlay_position: self.popup.overlay().and_then(Overlay::position),
            drawer: DrawerProps {
                open: self.drawer.is_open(),
                direction: self.settings.drawer_direction,
            },
            toggle_glyph: self.drawer.glyph(),
            radio_options: self.radio_options(),
            current_layer: self.current_layer,
        }
    }
}

impl View for LayerSwitcherView {
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

impl PopupView for LayerSwitcherView {
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
    use glam::DVec2;

    use super::*;
    use crate::{
        dom::ElementId,
        drawer::DrawerDirection,
        headless::HeadlessEngine,
        view::click_popup::POPUP_ELEMENT,
    };

    fn mounted() -> (HeadlessEngine, LayerSwitcherView) {
        let mut engine = HeadlessEngine::default();
        let mut view = LayerSwitcherView::new(ViewSettings::default()).unwrap();
        view.mount(&mut engine).unwrap();
        (engine, view)
    }

    fn assert_in_sync(engine: &HeadlessEngine, view: &LayerSwitcherView) {
        let current = view.current_layer();
        let visible_in_group: Vec<_> = view
            .layer_group()
            .layers()
            .iter()
            .filter(|layer| layer.visible)
            .map(|layer| layer.title)
            .collect();
        assert_eq!(visible_in_group, vec![current]);

        let map = engine.bound_map(&view.target()).unwrap();
        let visible: Vec<_> = map
            .layers
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(title, _)| *title)
            .collect();
        assert_eq!(visible, vec![current]);

        let checked: Vec<_> = view
            .radio_options()
            .into_iter()
            .filter(|option| option.checked)
            .map(|option| option.title)
            .collect();
        assert_eq!(checked, vec![current]);
    }

    #[test]
    fn initial_state() {
        let (engine, view) = mounted();
        let snapshot = view.render();

        assert_eq!(snapshot.current_layer, LayerTitle::Standard);
        assert!(!snapshot.drawer.open);
        assert_eq!(snapshot.drawer.direction, DrawerDirection::Left);
        assert_eq!(snapshot.toggle_glyph, ">");
        assert_eq!(
            snapshot.radio_options,
            vec![
                RadioOption {
                    title: LayerTitle::Standard,
                    checked: true
                },
                RadioOption {
                    title: LayerTitle::Humanitarian,
                    checked: false
                },
            ]
        );

        let map = engine.bound_map(&view.target()).unwrap();
        assert_eq!(map.layer_visible(LayerTitle::Standard), Some(true));
        assert_eq!(map.layer_visible(LayerTitle::Humanitarian), Some(false));
    }

    #[test]
    fn every_selection_keeps_one_layer_visible() {
        let (engine, mut view) = mounted();

        for title in [
            LayerTitle::Humanitarian,
            LayerTitle::Humanitarian,
            LayerTitle::Standard,
            LayerTitle::Humanitarian,
            LayerTitle::Standard,
            LayerTitle::Standard,
        ] {
            view.select_layer(title).unwrap();
            assert_eq!(view.current_layer(), title);
            assert_in_sync(&engine, &view);
        }
    }

    #[test]
    fn round_trip_restores_original_visibility() {
        let (engine, mut view) = mounted();
        let original_group = view.layer_group().clone();
        let original_map = engine.bound_map(&view.target()).unwrap();

        view.select_layer(LayerTitle::Humanitarian).unwrap();
        view.select_layer(LayerTitle::Standard).unwrap();

        assert_eq!(view.layer_group(), &original_group);
        assert_eq!(engine.bound_map(&view.target()).unwrap(), original_map);
    }

    #[test]
    fn unknown_layer_leaves_state_alone() {
        let (engine, mut view) = mounted();
        view.select_layer(LayerTitle::Humanitarian).unwrap();

        assert!(matches!(
            view.select_layer(LayerTitle::NaturalEarth),
            Err(ViewError::Layer(_))
        ));
        assert_eq!(view.current_layer(), LayerTitle::Humanitarian);
        assert_in_sync(&engine, &view);
    }

    #[test]
    fn selection_before_mount_reaches_engine() {
        let mut engine = HeadlessEngine::default();
        let mut view = LayerSwitcherView::new(ViewSettings::default()).unwrap();

        view.select_layer(LayerTitle::Humanitarian).unwrap();
        view.mount(&mut engine).unwrap();

        assert_in_sync(&engine, &view);
    }

    #[test]
    fn drawer_toggles() {
        let (_engine, mut view) = mounted();

        for presses in 1..=6 {
            view.toggle_drawer();
            let snapshot = view.render();
            assert_eq!(snapshot.drawer.open, presses % 2 == 1);
            assert_eq!(snapshot.toggle_glyph, if presses % 2 == 1 { "<" } else { ">" });
        }

        view.toggle_drawer();
        view.close_drawer();
        assert!(!view.render().drawer.open);
    }

    #[test]
    fn drawer_does_not_touch_layers() {
        let (engine, mut view) = mounted();
        view.toggle_drawer();

        assert_eq!(view.current_layer(), LayerTitle::Standard);
        assert_in_sync(&engine, &view);
    }

    #[test]
    fn popup_behaves_like_click_popup_view() {
        let (engine, mut view) = mounted();
        let click = engine.click(&view.target(), DVec2::new(512.0, 384.0)).unwrap();

        view.handle_click(click).unwrap();

        let snapshot = view.render();
        assert_eq!(snapshot.popup.hdms(), Some("0° 0°"));
        assert_eq!(snapshot.overlay_position, Some(click.coordinate));
        assert_eq!(
            engine
                .bound_map(&view.target())
                .unwrap()
                .overlay_position(&ElementId::new(POPUP_ELEMENT)),
            Some(click.coordinate)
        );
    }

    #[test]
    fn remount_keeps_selection_and_binds_once() {
        let (mut engine, mut view) = mounted();
        view.select_layer(LayerTitle::Humanitarian).unwrap();

        assert!(view.unmount());
        view.mount(&mut engine).unwrap();

        assert_eq!(engine.releases(), 1);
        assert_eq!(engine.bound_targets(), 1);
        assert_in_sync(&engine, &view);
    }
}
