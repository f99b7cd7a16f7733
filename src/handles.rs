// src/handles.rs
//! Handle Table
//!
//! Maps opaque numeric handles to shared, heap-resident objects. Several
//! handles may alias the same object; the object is dropped when the last
//! handle referring to it is released.
//!
//! Handle `0` is never issued.

use crate::distributions::Distribution;
use crate::engines::Engine;
use crate::error::{RandomError, RandomResult};
use crate::seed::SeedSeq;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Opaque reference to a registry-owned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of object a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Engine,
    Distribution,
    SeedSequence,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Engine => write!(f, "engine"),
            Category::Distribution => write!(f, "distribution"),
            Category::SeedSequence => write!(f, "seed sequence"),
        }
    }
}

/// A shared object stored in the table.
#[derive(Debug, Clone)]
pub enum Object {
    Engine(Rc<RefCell<Engine>>),
    Distribution(Rc<Distribution>),
    SeedSequence(Rc<SeedSeq>),
}

impl Object {
    pub fn category(&self) -> Category {
        match self {
            Object::Engine(_) => Category::Engine,
            Object::Distribution(_) => Category::Distribution,
            Object::SeedSequence(_) => Category::SeedSequence,
        }
    }
}

impl From<Engine> for Object {
    fn from(engine: Engine) -> Self {
        Object::Engine(Rc::new(RefCell::new(engine)))
    }
}

impl From<Distribution> for Object {
    fn from(distribution: Distribution) -> Self {
        Object::Distribution(Rc::new(distribution))
    }
}

impl From<SeedSeq> for Object {
    fn from(seq: SeedSeq) -> Self {
        Object::SeedSequence(Rc::new(seq))
    }
}

#[derive(Debug)]
pub struct HandleTable {
    next: u64,
    entries: HashMap<u64, Object>,
}

impl Default for HandleTable {
    fn default() -> Self {
        HandleTable {
            next: 1,
            entries: HashMap::new(),
        }
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `object` and issue a fresh handle for it.
    pub fn register(&mut self, object: impl Into<Object>) -> Handle {
        let object = object.into();
        let handle = Handle(self.next);
        self.next += 1;
        debug!(handle = %handle, category = %object.category(), "registered");
        self.entries.insert(handle.0, object);
        handle
    }

    /// Issue a second handle sharing the object behind `handle`.
    pub fn alias(&mut self, handle: Handle) -> RandomResult<Handle> {
        let object = self.resolve(handle)?.clone();
        Ok(self.register(object))
    }

    pub fn resolve(&self, handle: Handle) -> RandomResult<&Object> {
        self.entries.get(&handle.0).ok_or_else(|| {
            warn!(handle = %handle, "unresolved handle");
            RandomError::HandleNotFound { handle }
        })
    }

    /// Drop this handle's share of its object.
    pub fn release(&mut self, handle: Handle) -> RandomResult<()> {
        match self.entries.remove(&handle.0) {
            Some(object) => {
                debug!(handle = %handle, category = %object.category(), "released");
                Ok(())
            }
            None => {
                warn!(handle = %handle, "release of unknown handle");
                Err(RandomError::HandleNotFound { handle })
            }
        }
    }

    pub fn engine(&self, handle: Handle) -> RandomResult<Rc<RefCell<Engine>>> {
        match self.resolve(handle)? {
            Object::Engine(engine) => Ok(Rc::clone(engine)),
            other => Err(wrong_category(handle, Category::Engine, other)),
        }
    }

    pub fn distribution(&self, handle: Handle) -> RandomResult<Rc<Distribution>> {
        match self.resolve(handle)? {
            Object::Distribution(dist) => Ok(Rc::clone(dist)),
            other => Err(wrong_category(handle, Category::Distribution, other)),
        }
    }

    pub fn seed_sequence(&self, handle: Handle) -> RandomResult<Rc<SeedSeq>> {
        match self.resolve(handle)? {
            Object::SeedSequence(seq) => Ok(Rc::clone(seq)),
            other => Err(wrong_category(handle, Category::SeedSequence, other)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn wrong_category(handle: Handle, expected: Category, found: &Object) -> RandomError {
    warn!(
        handle = %handle,
        expected = %expected,
        found = %found.category(),
        "wrong handle category"
    );
    RandomError::WrongCategory {
        handle,
        expected,
        found: found.category(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{EngineKind, Seed};

    #[test]
    fn test_handles_are_unique_and_nonzero() {
        let mut table = HandleTable::new();
        let a = table.register(SeedSeq::new([1]));
        let b = table.register(SeedSeq::new([1]));
        assert_ne!(a, b);
        assert_ne!(a.raw(), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_alias_shares_object() {
        let mut table = HandleTable::new();
        let h = table.register(Engine::new(EngineKind::MinstdRand, Seed::Default));
        let alias = table.alias(h).unwrap();

        let first = table.engine(h).unwrap().borrow_mut().next_value();
        let second = table.engine(alias).unwrap().borrow_mut().next_value();

        let mut fresh = Engine::new(EngineKind::MinstdRand, Seed::Default);
        assert_eq!(first, fresh.next_value());
        assert_eq!(second, fresh.next_value());
    }

    #[test]
    fn test_release_drops_object_after_last_alias() {
        let mut table = HandleTable::new();
        let h = table.register(SeedSeq::new([3, 4]));
        let alias = table.alias(h).unwrap();
        let weak = Rc::downgrade(&table.seed_sequence(h).unwrap());

        table.release(h).unwrap();
        assert!(weak.upgrade().is_some());
        assert!(table.resolve(h).is_err());

        table.release(alias).unwrap();
        assert!(weak.upgrade().is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_release_twice_fails() {
        let mut table = HandleTable::new();
        let h = table.register(SeedSeq::default());
        table.release(h).unwrap();
        assert_eq!(table.release(h), Err(RandomError::HandleNotFound { handle: h }));
    }

    #[test]
    fn test_wrong_category() {
        let mut table = HandleTable::new();
        let h = table.register(SeedSeq::default());
        assert_eq!(
            table.engine(h).unwrap_err(),
            RandomError::WrongCategory {
                handle: h,
                expected: Category::Engine,
                found: Category::SeedSequence,
            }
        );
    }
}
