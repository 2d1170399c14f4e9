use tracing::info;

use crate::{dom::TargetId, engine::MapHandle};

/// Owns a mounted map. The target is cleared exactly once, either through
/// [`MapBinding::detach`] or when the binding is dropped.
pub struct MapBinding {
    target: TargetId,
    handle: Option<Box<dyn MapHandle>>,
}

impl MapBinding {
    pub fn new(target: TargetId, handle: Box<dyn MapHandle>) -> Self {
        Self {
            target,
            handle: Some(handle),
        }
    }

    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn handle_mut(&mut self) -> Option<&mut (dyn MapHandle + 'static)> {
        self.handle.as_deref_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns whether this call released the target.
    pub fn detach(&mut self) -> bool {
        let Some(mut handle) = self.handle.take() else {
            return false;
        };

        handle.set_target(None);
        info!(element = %self.target, "detached map");
        true
    }
}

impl Drop for MapBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for MapBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapBinding")
            .field("target", &self.target)
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use geo::Coord;

    use super::*;
    use crate::{dom::ElementId, map::layer::LayerTitle};

    struct CountingHandle(Arc<AtomicUsize>);

    impl MapHandle for CountingHandle {
        fn set_layer_visibility(&mut self, _title: LayerTitle, _visible: bool) {}

        fn set_overlay_position(&mut self, _element: &ElementId, _position: Option<Coord>) {}

        fn set_target(&mut self, target: Option<&TargetId>) {
            assert!(target.is_none());
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn detach_is_idempotent() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut binding = MapBinding::new(
            TargetId::new("map"),
            Box::new(CountingHandle(Arc::clone(&released))),
        );

        assert!(binding.detach());
        assert!(!binding.detach());
        drop(binding);

        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_detaches() {
        let released = Arc::new(AtomicUsize::new(0));
        {
            let _binding = MapBinding::new(
                TargetId::new("map"),
                Box::new(CountingHandle(Arc::clone(&released))),
            );
        }

        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}
