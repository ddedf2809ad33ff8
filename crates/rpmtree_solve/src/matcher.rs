//! Matches a capability requirement against the variables that provide the capability.

use std::borrow::Cow;

use indexmap::IndexSet;
use rpmtree_types::{ComparisonFlag, Entry};

use crate::id::VarId;
use crate::variable::{Variable, VariablePool};

/// Returns the variables that satisfy `entry`, at most one per owning package, in the order the
/// providers were loaded. For every package the first of its matching variables is picked.
///
/// An empty result means the requirement cannot be satisfied by anything in the pool.
pub(crate) fn matching_providers(pool: &VariablePool<'_>, entry: &Entry) -> Vec<VarId> {
    let mut seen_packages = IndexSet::new();
    let mut matches = Vec::new();
    for &id in pool.providers(&entry.name) {
        let variable = pool.variable(id);
        if seen_packages.contains(&variable.group) || !satisfies(variable, entry) {
            continue;
        }
        seen_packages.insert(variable.group);
        matches.push(id);
    }
    matches
}

/// Returns true if the capability represented by `variable` satisfies the version constraint of
/// `entry`.
fn satisfies(variable: &Variable<'_>, entry: &Entry) -> bool {
    if entry.flag == ComparisonFlag::None {
        return true;
    }

    // Files carry no version at all.
    let Some(provided) = variable.resource_version else {
        return true;
    };

    let provided = if entry.version.has_release() {
        Cow::Borrowed(provided)
    } else {
        Cow::Owned(provided.without_release())
    };

    // Unversioned provides satisfy every constraint.
    if provided.is_empty() {
        return true;
    }

    entry.flag.matches(provided.as_ref().cmp(&entry.version))
}
