use crate::Reflect;
use crate::value::Value;

/// A reflected leaf that converts itself to a tree node.
///
/// The decoding side lives in
/// [`OpaqueInfo::from_value`](crate::info::OpaqueInfo::from_value).
pub trait Opaque: Reflect {
    fn to_value(&self) -> Value;
}
