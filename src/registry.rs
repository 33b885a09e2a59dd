//! Global class directory.
//!
//! Class records are process-wide singletons: built once on first access,
//! leaked to `&'static`, and read-only afterward. The directory keys them by
//! `TypeId` and keeps a secondary name index for text-based lookup. A
//! universal root record named `"Object"` terminates every superclass chain.

use crate::class::ClassInfo;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Self-reporting contract for reflectable instances.
///
/// `class_info` must return the record of the *runtime* class, so each
/// implementation returns its own type's record and dynamic dispatch picks
/// the right one through `dyn Reflect`. The reflection layer never owns an
/// instance; it only receives borrows like this.
pub trait Reflect: Any {
    fn class_info(&self) -> &'static ClassInfo;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

lazy_static! {
    static ref DIRECTORY: ClassDirectory = ClassDirectory {
        by_type: RwLock::new(HashMap::new()),
        by_name: RwLock::new(HashMap::new()),
    };
}

/// Marker keying the root record; never instantiated.
struct RootClass;

/// Process-wide directory of class records, keyed by type identity.
pub struct ClassDirectory {
    by_type: RwLock<HashMap<TypeId, &'static ClassInfo>>,
    by_name: RwLock<HashMap<String, &'static ClassInfo>>,
}

impl ClassDirectory {
    /// The global directory.
    pub fn global() -> &'static ClassDirectory {
        &DIRECTORY
    }

    /// The universal root record: named `"Object"`, no superclass, the
    /// terminal case for superclass-chain delegation.
    pub fn root() -> &'static ClassInfo {
        Self::global().get_or_register::<RootClass>("Object", 0, None, |_| {})
    }

    /// Fetch the record for `T`, building and publishing it on first access.
    ///
    /// `register` runs on the still-unpublished record and performs the
    /// `add_property`/`add_function` calls. The superclass record must be
    /// resolved by the caller before this call, so registering a parent
    /// never re-enters the directory under its lock.
    ///
    /// Concurrent first access is safe: the record is built outside the
    /// lock and published under a double-checked write, so at most one
    /// record per class is ever observable. A lost race discards its record
    /// unpublished.
    pub fn get_or_register<T: Any>(
        &self,
        name: &str,
        size: usize,
        super_class: Option<&'static ClassInfo>,
        register: impl FnOnce(&mut ClassInfo),
    ) -> &'static ClassInfo {
        let key = TypeId::of::<T>();
        if let Some(&info) = self.by_type.read().get(&key) {
            return info;
        }

        let mut info = ClassInfo::new(name, size, super_class);
        register(&mut info);

        let mut by_type = self.by_type.write();
        if let Some(&existing) = by_type.get(&key) {
            return existing;
        }
        let info: &'static ClassInfo = Box::leak(Box::new(info));
        by_type.insert(key, info);
        drop(by_type);

        // Name index is secondary; a duplicated class name keeps the most
        // recent registration.
        self.by_name.write().insert(info.name.clone(), info);
        info
    }

    /// Look up the record for `T` without registering it.
    pub fn get<T: Any>(&self) -> Option<&'static ClassInfo> {
        self.by_type.read().get(&TypeId::of::<T>()).copied()
    }

    /// Look up a record by class name.
    pub fn by_name(&self, name: &str) -> Option<&'static ClassInfo> {
        self.by_name.read().get(name).copied()
    }

    /// Number of registered classes, the root included once created.
    pub fn len(&self) -> usize {
        self.by_type.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.read().is_empty()
    }
}
