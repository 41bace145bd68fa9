use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("no blueprints registered; register at least one before building")]
    NoBlueprints,

    #[error("blueprint '{key}' not found; registered keys: [{available}]")]
    UnknownKey { key: String, available: String },

    #[error("blueprint index {index} is out of range (registered: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("key '{key}' is registered at position {expected}, but index {given} was requested")]
    KeyIndexMismatch {
        key: String,
        expected: usize,
        given: usize,
    },

    #[error("no constructor of `{target}` is satisfiable from blueprint `{blueprint}`")]
    NoUsableConstructor {
        target: &'static str,
        blueprint: &'static str,
    },

    #[error("'{selector}' is not a plain member name")]
    BadSelector { selector: String },

    #[error("blueprint `{blueprint}` has no member '{member}'")]
    UnknownMember {
        member: String,
        blueprint: &'static str,
    },

    #[error("member '{member}': cannot convert {from} to {to}")]
    Conversion {
        member: String,
        from: String,
        to: String,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
