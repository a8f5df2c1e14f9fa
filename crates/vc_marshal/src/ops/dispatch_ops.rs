use crate::Reflect;

/// A reflected parse-dispatch value, encoded as its active member.
pub trait Dispatch: Reflect {
    /// Returns the declared name of the active variant.
    fn member_name(&self) -> &str;

    /// Returns the member value itself.
    fn member(&self) -> &dyn Reflect;
}
