//! An in-process engine that keeps map state in memory instead of drawing it.
//!
//! Used to drive views without a host UI: it records what each map was told, turns
//! pixels into coordinates the way a real viewport would and refuses to bind a target
//! twice, which makes leaked bindings visible.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use geo::Coord;
use glam::DVec2;
use tracing::debug;

use crate::{
    coord::projection::resolution_for_zoom,
    dom::{ElementId, TargetId},
    engine::{EngineError, MapClick, MapEngine, MapHandle, MapOptions, ViewOptions},
    map::layer::LayerTitle,
};

pub const DEFAULT_VIEWPORT: DVec2 = DVec2::new(1024.0, 768.0);

/// What a headless map currently looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMap {
    pub target: Option<TargetId>,
    pub view: ViewOptions,
    pub layers: Vec<(LayerTitle, bool)>,
    pub overlays: Vec<(ElementId, Option<Coord>)>,
}

impl HeadlessMap {
    pub fn layer_visible(&self, title: LayerTitle) -> Option<bool> {
        self.layers
            .iter()
            .find(|(t, _)| *t == title)
            .map(|(_, visible)| *visible)
    }

    pub fn overlay_position(&self, element: &ElementId) -> Option<Coord> {
        self.overlays
            .iter()
            .find(|(e, _)| e == element)
            .and_then(|(_, position)| *position)
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    maps: HashMap<u64, HeadlessMap>,
    bindings: HashMap<TargetId, u64>,
    releases: usize,
}

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    registry: Arc<Mutex<Registry>>,
    viewport: DVec2,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

impl HeadlessEngine {
    pub fn new(viewport: DVec2) -> Self {
        Self {
            registry: Arc::default(),
            viewport,
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }

    /// The map currently bound to `target`, if any.
    pub fn bound_map(&self, target: &TargetId) -> Option<HeadlessMap> {
        let registry = self.registry();
        let id = registry.bindings.get(target)?;
        registry.maps.get(id).cloned()
    }

    pub fn maps_created(&self) -> usize {
        self.registry().maps.len()
    }

    pub fn bound_targets(&self) -> usize {
        self.registry().bindings.len()
    }

    /// How many times a map was detached from its target.
    pub fn releases(&self) -> usize {
        self.registry().releases
    }

    /// Converts a pixel in the target element to projected metres, using the view the
    /// map was created with. North is up, so pixel y grows southwards.
    pub fn pixel_to_coordinate(&self, target: &TargetId, pixel: DVec2) -> Option<Coord> {
        let view = self.bound_map(target)?.view;
        let resolution = resolution_for_zoom(view.zoom);
        let offset = (pixel - self.viewport / 2.0) * resolution;

        Some(Coord {
            x: view.center.x + offset.x,
            y: view.center.y - offset.y,
        })
    }

    /// Builds the click event a real engine would emit for `pixel`.
    pub fn click(&self, target: &TargetId, pixel: DVec2) -> Option<MapClick> {
        let coordinate = self.pixel_to_coordinate(target, pixel)?;
        Some(MapClick { coordinate })
    }
}

impl MapEngine for HeadlessEngine {
    fn create_map(&mut self, options: MapOptions) -> Result<Box<dyn MapHandle>, EngineError> {
        let mut registry = self.registry();

        if registry.bindings.contains_key(&options.target) {
            return Err(EngineError::TargetInUse(options.target));
        }

        let id = registry.next_id;
        registry.next_id += 1;

        let map = HeadlessMap {
            target: Some(options.target.clone()),
            view: options.view,
            layers: options
                .layers
                .iter()
                .flat_map(|layer| layer.tiles())
                .map(|tile| (tile.title, tile.visible))
                .collect(),
            overlays: options
                .overlays
                .into_iter()
                .map(|overlay| (overlay.element, None))
                .collect(),
        };

        debug!(id, element = %options.target, layers = map.layers.len(), "created headless map");
        registry.bindings.insert(options.target, id);
        registry.maps.insert(id, map);

        Ok(Box::new(HeadlessHandle {
            id,
            registry: Arc::clone(&self.registry),
        }))
    }
}

struct HeadlessHandle {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl HeadlessHandle {
    fn with_map(&self, f: impl FnOnce(&mut HeadlessMap)) {
        if let Some(map) = lock(&self.registry).maps.get_mut(&self.id) {
            f(map);
        }
    }
}

impl MapHandle for HeadlessHandle {
    fn set_layer_visibility(&mut self, title: LayerTitle, visible: bool) {
        self.with_map(|map| {
            for (t, v) in &mut map.layers {
                if *t == title {
                    *v = visible;
                }
            }
        });
    }

    fn set_overlay_position(&mut self, element: &ElementId, position: Option<Coord>) {
        self.with_map(|map| {
            for (e, p) in &mut map.overlays {
                if e == element {
                    *p = position;
                }
            }
        });
    }

    fn set_target(&mut self, target: Option<&TargetId>) {
        let mut registry = lock(&self.registry);
        let registry = &mut *registry;

        let Some(map) = registry.maps.get_mut(&self.id) else {
            return;
        };

        if let Some(previous) = map.target.take() {
            registry.bindings.remove(&previous);
            registry.releases += 1;
        }

        if let Some(target) = target {
            if registry.bindings.contains_key(target) {
                debug!(id = self.id, element = %target, "target already bound; staying detached");
                return;
            }
            registry.bindings.insert(target.clone(), self.id);
            map.target = Some(target.clone());
        }
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
