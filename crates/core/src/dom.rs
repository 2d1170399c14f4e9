//! Identifiers for the host elements a view renders into.
//!
//! The host UI owns the actual elements; the core only ever refers to them by id.
//! Identifiers use `Arc<str>` so handing them to the engine is a refcount bump.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

// The container a map engine binds to.
impl_identifier!(TargetId);
// Any other element: popup container, popup content, closer.
impl_identifier!(ElementId);

/// A reference to a host element that may not be attached yet.
///
/// Views are constructed before the host has laid out their markup, so the popup
/// container starts out unattached and the host attaches it once it exists.
#[derive(Clone, Debug, Default)]
pub struct ElementRef {
    current: Option<ElementId>,
}

impl ElementRef {
    pub fn unattached() -> Self {
        Self { current: None }
    }

    pub fn attached(id: impl Into<ElementId>) -> Self {
        Self {
            current: Some(id.into()),
        }
    }

    pub fn attach(&mut self, id: impl Into<ElementId>) {
        self.current = Some(id.into());
    }

    pub fn detach(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ElementId> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = TargetId::new("markerpopupmap");
        let id2 = TargetId::new("markerpopupmap");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(TargetId::new("map"), 1);

        assert_eq!(map.get(&TargetId::new("map")), Some(&1));
    }

    #[test]
    fn test_element_ref_attach() {
        let mut popup = ElementRef::unattached();
        assert!(popup.current().is_none());

        popup.attach("popup");
        assert_eq!(popup.current(), Some(&ElementId::new("popup")));

        popup.detach();
        assert!(popup.current().is_none());
    }
}
