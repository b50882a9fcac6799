// Component discovery over the descriptor registry

use tracing::debug;

use crate::component::ComponentDescriptor;
use crate::error::Error;

/// Every compiled unit strictly under `base_package`, sorted by type name
/// and deduplicated.
///
/// No capability filtering happens here; unmarked units are listed and the
/// container decides what to do with them. An empty namespace or one that
/// resolves to no compiled unit is a fatal startup error.
pub fn scan(base_package: &str) -> Result<Vec<&'static ComponentDescriptor>, Error> {
    if base_package.is_empty() {
        return Err(Error::EmptyNamespace);
    }

    let mut units: Vec<&'static ComponentDescriptor> = inventory::iter::<ComponentDescriptor>
        .into_iter()
        .filter(|descriptor| in_namespace(descriptor.type_name, base_package))
        .collect();
    units.sort_by_key(|descriptor| descriptor.type_name);
    units.dedup_by_key(|descriptor| descriptor.type_name);

    if units.is_empty() {
        return Err(Error::NamespaceNotFound(base_package.to_string()));
    }

    debug!(base_package, units = units.len(), "namespace scan complete");
    Ok(units)
}

/// `name` is under `base` when it continues with `::` on a segment
/// boundary; `shop_extra::X` is not under `shop`.
fn in_namespace(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .is_some_and(|rest| rest.starts_with("::"))
}
