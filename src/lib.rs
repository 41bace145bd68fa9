//! Specimen - blueprint-driven fixture construction
//!
//! Register named blueprints (bags of candidate field values) once, then
//! build fully populated target instances on demand: a best-fit constructor
//! is chosen by name/type matching, leftover values are injected through
//! setters, and queued overrides replay onto every fresh snapshot first.

pub mod core;
pub mod fixture;

pub use crate::core::{BuildError, Kind, OrderedMap, Result, Value};
pub use crate::fixture::{
    Batch, BlueprintRegistry, Builder, Construct, Constructor, Factory, Fixture, Member,
    OverrideChain, Param, Reflect, Setter,
};
