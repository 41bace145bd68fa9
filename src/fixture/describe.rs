//! Introspection capability traits.
//!
//! The engine never names user types directly; it works against two
//! descriptor surfaces. `Reflect` is the blueprint side: a readable,
//! writable bag of named members. `Construct` is the target side: the
//! constructors a type offers and the members that can still be assigned
//! after construction. Implementations are plain handwritten (or generated)
//! tables; nothing here requires runtime reflection.

use crate::core::{Kind, Result, Value};

/// A declared blueprint member.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: &'static str,
    pub kind: Kind,
}

impl Member {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// Blueprint-side introspection: enumerate members, read one, write one.
///
/// `get_member` and `set_member` receive the exact names returned by
/// `members()`; case-insensitive matching is the engine's job, not the
/// implementor's.
pub trait Reflect {
    /// Declared members, in declaration order.
    fn members() -> Vec<Member>;

    /// Current value of a member, `None` if the name is not a member.
    fn get_member(&self, name: &str) -> Option<Value>;

    /// Assign a member. The engine converts the value to the declared kind
    /// before calling this, so implementations may reject anything else.
    fn set_member(&mut self, name: &str, value: Value) -> Result<()>;
}

/// A constructor parameter: a name and a declared kind.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: &'static str,
    pub kind: Kind,
}

impl Param {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// One constructor of a target type.
///
/// `invoke` receives values already checked against `params` (same order,
/// assignable kinds) and must produce the instance.
pub struct Constructor<T> {
    pub params: Vec<Param>,
    pub invoke: fn(&[Value]) -> T,
}

impl<T> Constructor<T> {
    pub fn new(params: Vec<Param>, invoke: fn(&[Value]) -> T) -> Self {
        Self { params, invoke }
    }
}

/// A settable member of a target type.
///
/// `apply` receives a value already checked against `kind`.
pub struct Setter<T> {
    pub name: &'static str,
    pub kind: Kind,
    pub apply: fn(&mut T, Value),
}

impl<T> Setter<T> {
    pub fn new(name: &'static str, kind: Kind, apply: fn(&mut T, Value)) -> Self {
        Self { name, kind, apply }
    }
}

/// Target-side introspection: constructor candidates and settable members.
pub trait Construct: Sized {
    /// All constructors, in declaration order. Order among constructors of
    /// equal arity is the deterministic tie-breaker during selection.
    fn constructors() -> Vec<Constructor<Self>>;

    /// Members assignable after construction.
    fn setters() -> Vec<Setter<Self>>;
}
