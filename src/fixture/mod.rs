//! The fixture construction engine: introspection descriptors, blueprint
//! registry and selection, the override chain, best-fit instantiation, and
//! the builder facade that ties them together.

pub mod builder;
pub mod describe;
pub mod instantiate;
pub mod overrides;
pub mod registry;

pub use builder::{Batch, Builder, Fixture};
pub use describe::{Construct, Constructor, Member, Param, Reflect, Setter};
pub use instantiate::instantiate;
pub use overrides::OverrideChain;
pub use registry::{BlueprintRegistry, Factory};
