/// How a declared field is owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Owned by the entity itself. Resolved once when bound, then fixed.
    Static,
    /// Owned by each instance. Re-resolved on every read.
    Instance,
}

/// What a binder or scope is being applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The entity as a whole.
    Entity,
    /// One named field of the entity.
    Field(&'a str),
}
