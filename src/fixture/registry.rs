//! Blueprint registration and per-build selection.
//!
//! The registry owns the named blueprint factories in registration order and
//! resolves exactly one of them per build request. Selection precedence is
//! strict: explicit key (optionally cross-checked against an explicit index)
//! beats explicit index, which beats the builder's default key, which beats
//! position zero.

use crate::core::{BuildError, OrderedMap, Result};

/// Produces a fresh blueprint snapshot on every call.
pub type Factory<B> = Box<dyn Fn() -> B>;

/// Named blueprint factories, in registration order. Read-only after setup.
pub struct BlueprintRegistry<B> {
    entries: OrderedMap<Factory<B>>,
}

impl<B> BlueprintRegistry<B> {
    pub fn new(entries: OrderedMap<Factory<B>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().map(str::to_owned).collect()
    }

    /// Resolve one factory and invoke it for a fresh snapshot.
    ///
    /// An empty registry fails before any key or index is looked at. When
    /// both a key and an index are given, the index must agree with the
    /// key's registered position.
    pub fn resolve(
        &self,
        key: Option<&str>,
        index: Option<usize>,
        default_key: Option<&str>,
    ) -> Result<B> {
        if self.entries.is_empty() {
            return Err(BuildError::NoBlueprints);
        }

        if let Some(key) = key {
            let position = self.position_of(key)?;
            if let Some(index) = index {
                if index != position {
                    return Err(BuildError::KeyIndexMismatch {
                        key: key.to_owned(),
                        expected: position,
                        given: index,
                    });
                }
            }
            return self.invoke_at(position);
        }

        if let Some(index) = index {
            if index >= self.entries.len() {
                return Err(BuildError::IndexOutOfRange {
                    index,
                    len: self.entries.len(),
                });
            }
            return self.invoke_at(index);
        }

        if let Some(default_key) = default_key {
            let position = self.position_of(default_key)?;
            return self.invoke_at(position);
        }

        self.invoke_at(0)
    }

    fn position_of(&self, key: &str) -> Result<usize> {
        self.entries
            .index_of(key)
            .ok_or_else(|| BuildError::UnknownKey {
                key: key.to_owned(),
                available: self.entries.keys().collect::<Vec<_>>().join(", "),
            })
    }

    fn invoke_at(&self, position: usize) -> Result<B> {
        let (key, factory) = self
            .entries
            .get_index(position)
            .ok_or(BuildError::NoBlueprints)?;
        tracing::debug!(key, position, "resolved blueprint");
        Ok(factory())
    }
}
