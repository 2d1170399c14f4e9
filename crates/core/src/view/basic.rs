use crate::{
    config::ViewSettings,
    dom::TargetId,
    engine::{MapLayer, MapOptions},
    lifecycle::MapBinding,
    map::{catalog::LayerCatalog, layer::LayerTitle},
    view::{View, ViewError, ensure_unmounted, store},
};

pub const DEFAULT_TARGET: &str = "map";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicMapSnapshot {
    pub target: TargetId,
    pub mounted: bool,
}

/// One OpenStreetMap layer at a fixed center and zoom. Pan and zoom are left to the
/// engine.
#[derive(Debug)]
pub struct BasicMapView {
    settings: ViewSettings,
    binding: Option<MapBinding>,
}

impl BasicMapView {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            settings,
            binding: None,
        }
    }

    pub fn target(&self) -> TargetId {
        self.settings.target_or(DEFAULT_TARGET)
    }

    /// The map this view creates at mount.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            target: self.target(),
            view: self.settings.view_options(),
            layers: vec![MapLayer::Tile(LayerCatalog::layer(LayerTitle::Standard, true))],
            overlays: Vec::new(),
        }
    }

    pub fn render(&self) -> BasicMapSnapshot {
        BasicMapSnapshot {
            target: self.target(),
            mounted: self.is_mounted(),
        }
    }
}

impl View for BasicMapView {
    fn mount_options(&self) -> Result<MapOptions, ViewError> {
        ensure_unmounted(&self.binding)?;
        Ok(self.map_options())
    }

    fn attach(&mut self, _options: &MapOptions, binding: MapBinding) -> Result<(), MapBinding> {
        store(&mut self.binding, binding)
    }

    fn release(&mut self) -> Option<MapBinding> {
        self.binding.take()
    }

    fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::EngineError, headless::HeadlessEngine};

    #[test]
    fn mounts_standard_layer_at_default_view() {
        let mut engine = HeadlessEngine::default();
        let mut view = BasicMapView::new(ViewSettings::default());
        view.mount(&mut engine).unwrap();

        let map = engine.bound_map(&TargetId::new("map")).unwrap();
        assert_eq!(map.layers, vec![(LayerTitle::Standard, true)]);
        assert_eq!(map.view.zoom, 2.0);
        assert!(map.overlays.is_empty());
        assert!(view.render().mounted);
    }

    #[test]
    fn two_views_cannot_share_a_target() {
        let mut engine = HeadlessEngine::default();
        let mut first = BasicMapView::new(ViewSettings::default());
        let mut second = BasicMapView::new(ViewSettings::default());

        first.mount(&mut engine).unwrap();
        assert!(matches!(
            second.mount(&mut engine),
            Err(ViewError::Engine(EngineError::TargetInUse(_)))
        ));
        assert!(!second.is_mounted());

        first.unmount();
        second.mount(&mut engine).unwrap();
        assert_eq!(engine.bound_targets(), 1);
    }

    #[test]
    fn custom_target() {
        let mut engine = HeadlessEngine::default();
        let settings = ViewSettings::from_json(r#"{ "target": "osm" }"#).unwrap();
        let mut view = BasicMapView::new(settings);
        view.mount(&mut engine).unwrap();

        assert!(engine.bound_map(&TargetId::new("osm")).is_some());
        assert!(engine.bound_map(&TargetId::new("map")).is_none());
    }
}
