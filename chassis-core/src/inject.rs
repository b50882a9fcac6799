// Injectable dependency slot

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A dependency slot: empty until the resolver fills it, shared read-only
/// for the rest of the process lifetime.
///
/// Components declare injectable fields as `Dependency<T>` (or
/// `Dependency<dyn Capability>`), which lets the resolver assign through a
/// shared reference regardless of field visibility. An unresolved slot
/// simply stays empty.
pub struct Dependency<T: ?Sized> {
    cell: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Dependency<T> {
    /// An unfilled slot.
    pub fn empty() -> Self {
        Self {
            cell: RwLock::new(None),
        }
    }

    /// Assign the slot. A later assignment replaces the earlier one.
    pub fn fill(&self, value: Arc<T>) {
        *self.cell.write() = Some(value);
    }

    /// The injected value, if the slot was resolved.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.read().clone()
    }

    pub fn is_filled(&self) -> bool {
        self.cell.read().is_some()
    }
}

impl<T: ?Sized> Default for Dependency<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> fmt::Debug for Dependency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("filled", &self.is_filled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let slot: Dependency<String> = Dependency::empty();
        assert!(!slot.is_filled());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_fill_and_get_share_the_value() {
        let slot: Dependency<String> = Dependency::default();
        let value = Arc::new("wired".to_string());
        slot.fill(value.clone());

        assert!(slot.is_filled());
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &value));
    }

    #[test]
    fn test_trait_object_slot() {
        trait Greeter: Send + Sync {
            fn hello(&self) -> &'static str;
        }
        struct English;
        impl Greeter for English {
            fn hello(&self) -> &'static str {
                "hello"
            }
        }

        let slot: Dependency<dyn Greeter> = Dependency::empty();
        slot.fill(Arc::new(English));
        assert_eq!(slot.get().unwrap().hello(), "hello");
    }
}
