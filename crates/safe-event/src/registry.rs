//! Heterogeneous registry holding at most one value per type.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

/// A stored value and the name of its concrete type.
///
/// The boxed value is dropped exactly once, when the entry is removed from
/// the map or the registry itself is dropped.
struct Entry {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// Type-keyed container: one instance of each registered type.
///
/// Lookups are keyed by [`TypeId`], so two distinct types never collide and
/// a stored value can only ever be read back as the type it was inserted as.
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("types", &names)
            .finish()
    }
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert `value` as the instance of `T`.
    ///
    /// Returns `false` and drops `value` if an instance of `T` is already
    /// stored; the existing instance is left untouched.
    pub fn register<T>(&mut self, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.register_with(|| value)
    }

    /// Insert an instance of `T` built by `init`.
    ///
    /// `init` only runs when no instance of `T` is stored yet.
    pub fn register_with<T, F>(&mut self, init: F) -> bool
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        use std::collections::hash_map::Entry as MapEntry;

        match self.entries.entry(TypeId::of::<T>()) {
            MapEntry::Occupied(_) => false,
            MapEntry::Vacant(slot) => {
                slot.insert(Entry {
                    type_name: type_name::<T>(),
                    value: Box::new(init()),
                });
                true
            },
        }
    }

    /// Insert `T::default()` as the instance of `T`.
    pub fn register_default<T>(&mut self) -> bool
    where
        T: Any + Send + Sync + Default,
    {
        self.register_with(T::default)
    }

    /// Borrow the stored instance of `T`, if any. Never constructs one.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref::<T>())
    }

    /// Mutably borrow the stored instance of `T`, if any.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_mut::<T>())
    }

    /// Check whether an instance of `T` is stored.
    #[must_use]
    pub fn exists<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every stored instance.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default, PartialEq)]
    struct Counter(u32);

    struct DropNotify(Arc<AtomicUsize>);

    impl Drop for DropNotify {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_register_once_per_type() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(Counter(1)));
        assert!(!registry.register(Counter(2)));

        assert_eq!(registry.get::<Counter>(), Some(&Counter(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_types_do_not_collide() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register(7u32));
        assert!(registry.register(7u64));
        assert!(registry.register(String::from("seven")));

        assert_eq!(registry.get::<u32>(), Some(&7));
        assert_eq!(registry.get::<u64>(), Some(&7));
        assert_eq!(registry.get::<String>().map(String::as_str), Some("seven"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_get_never_constructs() {
        let registry = TypeRegistry::new();
        assert!(registry.get::<Counter>().is_none());
        assert!(!registry.exists::<Counter>());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_with_skips_init_when_present() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register_default::<Counter>());

        let calls = AtomicUsize::new(0);
        let inserted = registry.register_with(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Counter(9)
        });

        assert!(!inserted);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.get::<Counter>(), Some(&Counter(0)));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut registry = TypeRegistry::new();
        registry.register(Counter(1));

        if let Some(counter) = registry.get_mut::<Counter>() {
            counter.0 = 5;
        }
        assert_eq!(registry.get::<Counter>(), Some(&Counter(5)));
    }

    #[test]
    fn test_duplicate_value_is_dropped() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut registry = TypeRegistry::new();

        assert!(registry.register(DropNotify(Arc::clone(&drops))));
        assert!(!registry.register(DropNotify(Arc::clone(&drops))));

        // The rejected value is dropped immediately, the stored one is kept.
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(registry.exists::<DropNotify>());
    }

    #[test]
    fn test_teardown_drops_each_entry_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut registry = TypeRegistry::new();
        registry.register(DropNotify(Arc::clone(&drops)));
        registry.register((DropNotify(Arc::clone(&drops)), 1u8));

        registry.clear();
        assert_eq!(drops.load(Ordering::SeqCst), 2);
        assert!(registry.is_empty());

        drop(registry);
        assert_eq!(drops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_releases_entries() {
        let drops = Arc::new(AtomicUsize::new(0));
        {
            let mut registry = TypeRegistry::new();
            registry.register(DropNotify(Arc::clone(&drops)));
        }
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_lists_type_names() {
        let mut registry = TypeRegistry::new();
        registry.register(Counter(0));
        let debug = format!("{registry:?}");
        assert!(debug.contains("Counter"));
    }
}
