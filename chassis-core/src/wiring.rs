// Post-registration dependency resolution

use tracing::{debug, trace, warn};

use crate::container::Container;

/// Fill the declared dependency slots of every registered instance.
///
/// Each slot resolves by its explicit qualifier when one is declared,
/// otherwise by its declared-type key. A missing entry, or an entry whose
/// views cannot satisfy the slot's type, leaves the slot empty; resolution
/// never fails. Runs exactly once, after registration and before route
/// building.
pub fn wire(container: &Container) {
    for entry in container.canonical_entries() {
        let unit = entry.descriptor.type_name;
        for slot in &entry.descriptor.slots {
            let key = slot.qualifier.unwrap_or(slot.type_key);
            let Some(dependency) = container.get(key) else {
                debug!(unit, field = slot.field, key, "dependency absent, slot left empty");
                continue;
            };
            if (slot.assign)(entry.instance.as_ref(), dependency) {
                trace!(unit, field = slot.field, key, "dependency wired");
            } else {
                warn!(
                    unit,
                    field = slot.field,
                    key,
                    "dependency type mismatch, slot left empty"
                );
            }
        }
    }
}
