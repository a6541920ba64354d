//! Entity trait: identity that survives field replacement.

/// Entity marker + minimal interface.
///
/// A product keeps its id across updates; only the writable fields change.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
