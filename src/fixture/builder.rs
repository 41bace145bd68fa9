//! Builder facade.
//!
//! A `Builder` is created in two phases: the fixture's registration routine
//! populates an ordered map of blueprint factories first, then the builder
//! value is constructed around the finished registry, then the fixture's
//! baseline-override routine runs once. Nothing is resolved until `build`.
//!
//! Every build is independent: resolve a factory, invoke it for a fresh
//! snapshot, replay the override chain onto it, hand it to the fixture's
//! construct hook. Batch builds repeat that cycle per item, lazily.

use super::describe::{Construct, Reflect};
use super::instantiate::instantiate;
use super::overrides::OverrideChain;
use super::registry::{BlueprintRegistry, Factory};
use crate::core::{BuildError, OrderedMap, Result, Value};

/// A user-defined fixture: blueprint registration, optional baseline
/// overrides, and an optional replacement for the reflective construction
/// algorithm.
pub trait Fixture: Sized {
    type Blueprint: Reflect;
    type Target: Construct;

    /// Register at least one named blueprint factory. Invoked exactly once
    /// per builder, before anything else.
    fn blueprints(reg: &mut OrderedMap<Factory<Self::Blueprint>>);

    /// Queue baseline overrides on the freshly created builder. Invoked
    /// exactly once per builder, after registration.
    fn defaults(_builder: &mut Builder<Self>) -> Result<()> {
        Ok(())
    }

    /// Turn a finished snapshot into a target. The default is the best-fit
    /// constructor algorithm; overriding this replaces it entirely.
    fn construct(blueprint: &Self::Blueprint) -> Result<Self::Target> {
        instantiate(blueprint)
    }
}

/// Coordinates the registry, the override chain, and instantiation.
pub struct Builder<F: Fixture> {
    registry: BlueprintRegistry<F::Blueprint>,
    chain: OverrideChain<F::Blueprint>,
    default_key: Option<String>,
}

impl<F: Fixture> Builder<F> {
    /// Create a builder with no instance default key.
    pub fn create() -> Result<Self> {
        Self::assemble(None)
    }

    /// Create a builder whose no-argument builds use `key` instead of the
    /// first registered blueprint. The key is checked at build time.
    pub fn with_default(key: impl Into<String>) -> Result<Self> {
        Self::assemble(Some(key.into()))
    }

    fn assemble(default_key: Option<String>) -> Result<Self> {
        let mut entries = OrderedMap::new();
        F::blueprints(&mut entries);

        let mut builder = Builder {
            registry: BlueprintRegistry::new(entries),
            chain: OverrideChain::new(),
            default_key,
        };
        F::defaults(&mut builder)?;
        Ok(builder)
    }

    /// Number of registered blueprints.
    pub fn blueprint_count(&self) -> usize {
        self.registry.len()
    }

    /// Queue a fixed-value override for every subsequent build. Deferred;
    /// no blueprint is touched until `build`.
    pub fn set(&mut self, member: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.chain.push_value(member, value.into())?;
        Ok(self)
    }

    /// Queue a derived override; the generator runs against each build's
    /// snapshot, after earlier overrides have been applied to it.
    pub fn set_with<G>(&mut self, member: &str, generate: G) -> Result<&mut Self>
    where
        G: Fn(&F::Blueprint) -> Value + 'static,
    {
        self.chain.push_derived(member, generate)?;
        Ok(self)
    }

    /// Build one target from the default blueprint (instance default key if
    /// configured, else the first registered).
    pub fn build(&self) -> Result<F::Target> {
        self.build_with(None, None)
    }

    /// Build one target from the blueprint registered under `key`.
    pub fn build_key(&self, key: &str) -> Result<F::Target> {
        self.build_with(Some(key), None)
    }

    /// Build one target from the blueprint at `index` in registration order.
    pub fn build_index(&self, index: usize) -> Result<F::Target> {
        self.build_with(None, Some(index))
    }

    /// Build one target with explicit selection. Key beats index; when both
    /// are given the index must match the key's registered position.
    pub fn build_with(&self, key: Option<&str>, index: Option<usize>) -> Result<F::Target> {
        let mut snapshot = self
            .registry
            .resolve(key, index, self.default_key.as_deref())?;
        self.chain.apply(&mut snapshot)?;
        F::construct(&snapshot)
    }

    /// Build exactly one target per key, in the given order. Zero keys
    /// yields an empty sequence.
    pub fn build_each(&self, keys: &[&str]) -> Batch<'_, F> {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let count = keys.len();
        Batch::new(self, keys, count)
    }

    /// Build `count` targets, cycling through `keys` by position. An empty
    /// key list cycles through all registered blueprints in registration
    /// order.
    pub fn build_cycle(&self, count: usize, keys: &[&str]) -> Batch<'_, F> {
        let keys: Vec<String> = if keys.is_empty() {
            self.registry.keys()
        } else {
            keys.iter().map(|k| k.to_string()).collect()
        };
        Batch::new(self, keys, count)
    }

    /// Build one target per registered blueprint, in registration order.
    pub fn build_all(&self) -> Batch<'_, F> {
        let keys = self.registry.keys();
        let count = keys.len();
        Batch::new(self, keys, count)
    }
}

/// Lazy batch sequence: each element is built when consumed, one factory
/// invocation and one override replay per element.
pub struct Batch<'a, F: Fixture> {
    builder: &'a Builder<F>,
    keys: Vec<String>,
    remaining: usize,
    cursor: usize,
}

impl<'a, F: Fixture> Batch<'a, F> {
    fn new(builder: &'a Builder<F>, keys: Vec<String>, remaining: usize) -> Self {
        Self {
            builder,
            keys,
            remaining,
            cursor: 0,
        }
    }
}

impl<F: Fixture> Iterator for Batch<'_, F> {
    type Item = Result<F::Target>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.keys.is_empty() {
            // Cycling over an empty registry: a configuration error, once.
            self.remaining = 0;
            return Some(Err(BuildError::NoBlueprints));
        }
        let key = self.keys[self.cursor % self.keys.len()].clone();
        self.cursor += 1;
        self.remaining -= 1;
        Some(self.builder.build_key(&key))
    }
}
