//! # Environment Lookup
//!
//! The page's global namespace, reduced to one question: is there a capability
//! object at this key right now? Browsers answer it from `window`; tests and
//! embedders answer it from a [`StaticEnvironment`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::capability::Capability;

/// Source of externally injected capability objects.
///
/// Lookups must be cheap and side-effect free; they run on every probe.
pub trait Environment {
    fn capability(&self, global_key: &str) -> Option<Rc<dyn Capability>>;
}

/// Dependency-injected map of global key → capability object.
///
/// Interior mutability lets callers inject or remove providers after the
/// adapter has been built, the way extensions appear and vanish in a page.
#[derive(Default)]
pub struct StaticEnvironment {
    objects: RefCell<HashMap<String, Rc<dyn Capability>>>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, global_key: impl Into<String>, capability: impl Capability + 'static) -> Self {
        self.insert(global_key, capability);
        self
    }

    pub fn insert(&self, global_key: impl Into<String>, capability: impl Capability + 'static) {
        self.objects
            .borrow_mut()
            .insert(global_key.into(), Rc::new(capability));
    }

    pub fn remove(&self, global_key: &str) -> bool {
        self.objects.borrow_mut().remove(global_key).is_some()
    }
}

impl Environment for StaticEnvironment {
    fn capability(&self, global_key: &str) -> Option<Rc<dyn Capability>> {
        self.objects.borrow().get(global_key).cloned()
    }
}
