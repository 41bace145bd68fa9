//! Deferred override chain.
//!
//! Overrides are queued on the builder and replayed, in registration order,
//! onto each freshly resolved blueprint snapshot just before instantiation.
//! A derived override reads the snapshot as it stands at its turn, so it
//! observes the effects of earlier entries. Two entries on the same member
//! both run; the later write is what the instantiator sees.

use std::any::type_name;

use super::describe::Reflect;
use crate::core::{BuildError, Kind, Result, Value};

enum Payload<B> {
    Fixed(Value),
    Derived(Box<dyn Fn(&B) -> Value>),
}

struct Entry<B> {
    /// Canonical member name, as declared by the blueprint.
    member: &'static str,
    kind: Kind,
    payload: Payload<B>,
}

/// Ordered list of deferred snapshot mutations.
pub struct OverrideChain<B> {
    entries: Vec<Entry<B>>,
}

impl<B: Reflect> OverrideChain<B> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue a fixed-value override. The value is converted against the
    /// declared member kind at application time, not here.
    pub fn push_value(&mut self, selector: &str, value: Value) -> Result<()> {
        let (member, kind) = resolve_member::<B>(selector)?;
        self.entries.push(Entry {
            member,
            kind,
            payload: Payload::Fixed(value),
        });
        Ok(())
    }

    /// Queue an override whose value is computed from the snapshot at
    /// application time.
    pub fn push_derived<F>(&mut self, selector: &str, generate: F) -> Result<()>
    where
        F: Fn(&B) -> Value + 'static,
    {
        let (member, kind) = resolve_member::<B>(selector)?;
        self.entries.push(Entry {
            member,
            kind,
            payload: Payload::Derived(Box::new(generate)),
        });
        Ok(())
    }

    /// Replay every entry, in order, against the one snapshot.
    pub fn apply(&self, snapshot: &mut B) -> Result<()> {
        for entry in &self.entries {
            let raw = match &entry.payload {
                Payload::Fixed(value) => value.clone(),
                Payload::Derived(generate) => generate(snapshot),
            };
            let value = raw
                .convert_to(&entry.kind)
                .map_err(|rejected| BuildError::Conversion {
                    member: entry.member.to_owned(),
                    from: rejected.kind_name().to_owned(),
                    to: entry.kind.to_string(),
                })?;
            snapshot.set_member(entry.member, value)?;
        }
        Ok(())
    }
}

impl<B: Reflect> Default for OverrideChain<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate selector shape and resolve it to a declared member.
///
/// Selectors must be bare identifiers; paths, indexing, and anything else
/// that is not a simple member access are rejected here, at call time.
fn resolve_member<B: Reflect>(selector: &str) -> Result<(&'static str, Kind)> {
    if !is_identifier(selector) {
        return Err(BuildError::BadSelector {
            selector: selector.to_owned(),
        });
    }
    B::members()
        .into_iter()
        .find(|m| m.name.eq_ignore_ascii_case(selector))
        .map(|m| (m.name, m.kind))
        .ok_or_else(|| BuildError::UnknownMember {
            member: selector.to_owned(),
            blueprint: type_name::<B>(),
        })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
