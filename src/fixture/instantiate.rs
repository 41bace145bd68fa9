//! Best-fit constructor instantiation.
//!
//! Materializes a target from a blueprint snapshot: rank the target's
//! constructors by parameter count, pick the first whose every parameter has
//! a same-named, assignable snapshot value, invoke it, then assign any
//! remaining settable members that also match by name and kind. Unmatched
//! snapshot entries and unmatched setters are skipped on purpose; target
//! defaults survive where the blueprint is silent.

use std::any::type_name;
use std::collections::{HashMap, HashSet};

use super::describe::{Construct, Reflect};
use crate::core::{BuildError, Result, Value};

/// Construct a `T` from the blueprint snapshot.
///
/// Deterministic for a given snapshot and target: ranking is a stable sort
/// (declaration order breaks arity ties) and compatibility checks are pure.
pub fn instantiate<B: Reflect, T: Construct>(blueprint: &B) -> Result<T> {
    // Fresh per call; snapshots are transient and never cached.
    let snapshot = snapshot_map(blueprint);

    let mut constructors = T::constructors();
    constructors.sort_by(|a, b| b.params.len().cmp(&a.params.len()));

    let chosen = constructors
        .iter()
        .find(|c| {
            c.params.iter().all(|p| {
                snapshot
                    .get(&p.name.to_lowercase())
                    .map(|v| v.is_assignable_to(&p.kind))
                    .unwrap_or(false)
            })
        })
        .ok_or_else(|| BuildError::NoUsableConstructor {
            target: type_name::<T>(),
            blueprint: type_name::<B>(),
        })?;

    tracing::debug!(
        target_type = type_name::<T>(),
        arity = chosen.params.len(),
        "selected constructor"
    );

    let args: Vec<Value> = chosen
        .params
        .iter()
        .map(|p| snapshot[&p.name.to_lowercase()].clone())
        .collect();
    let mut target = (chosen.invoke)(&args);

    let consumed: HashSet<String> = chosen
        .params
        .iter()
        .map(|p| p.name.to_lowercase())
        .collect();

    for setter in T::setters() {
        let folded = setter.name.to_lowercase();
        if consumed.contains(&folded) {
            continue;
        }
        if let Some(value) = snapshot.get(&folded) {
            if value.is_assignable_to(&setter.kind) {
                (setter.apply)(&mut target, value.clone());
            }
        }
    }

    Ok(target)
}

/// Case-insensitive member-name to value map for one snapshot.
fn snapshot_map<B: Reflect>(blueprint: &B) -> HashMap<String, Value> {
    B::members()
        .into_iter()
        .filter_map(|m| {
            blueprint
                .get_member(m.name)
                .map(|v| (m.name.to_lowercase(), v))
        })
        .collect()
}
