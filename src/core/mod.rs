pub mod error;
pub mod ordered;
pub mod value;

pub use error::{BuildError, Result};
pub use ordered::OrderedMap;
pub use value::{Kind, Value};
