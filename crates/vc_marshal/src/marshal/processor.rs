use alloc::boxed::Box;

use super::{DecodeErrorKind, EncodeErrorKind};
use crate::Reflect;
use crate::info::TypeInfo;
use crate::registry::TypeRegistry;
use crate::value::Value;

/// User logic consulted by [`EncodeDriver`] before the default encoding of
/// every value.
///
/// ## Return Value Semantics
///
/// - **`Some(Ok(tree))`**: the value was encoded by the processor.
/// - **`Some(Err(error))`**: the value is handled here but failed.
/// - **`None`**: not handled; the driver falls back to the descriptor.
///
/// The `()` processor handles nothing.
///
/// ```
/// use vc_marshal::{Reflect, derive::Reflect as DeriveReflect};
/// use vc_marshal::marshal::{EncodeDriver, EncodeErrorKind, EncodeProcessor};
/// use vc_marshal::registry::TypeRegistry;
/// use vc_marshal::value::Value;
///
/// /// Writes every `f64` with two decimals, as a string.
/// struct Money;
///
/// impl EncodeProcessor for Money {
///     fn try_encode(
///         &self,
///         value: &dyn Reflect,
///         _registry: &TypeRegistry,
///     ) -> Option<Result<Value, EncodeErrorKind>> {
///         let amount = value.downcast_ref::<f64>()?;
///         Some(Ok(Value::from(format!("{amount:.2}"))))
///     }
/// }
///
/// #[derive(DeriveReflect)]
/// struct Invoice {
///     total: f64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Invoice>().unwrap();
///
/// let tree = EncodeDriver::with_processor(&registry, &Money)
///     .encode(&Invoice { total: 3.5 })
///     .unwrap();
/// assert_eq!(tree.as_mapping().unwrap().get("total"), Some(&Value::from("3.50")));
/// ```
///
/// [`EncodeDriver`]: crate::marshal::EncodeDriver
pub trait EncodeProcessor {
    fn try_encode(
        &self,
        value: &dyn Reflect,
        registry: &TypeRegistry,
    ) -> Option<Result<Value, EncodeErrorKind>>;
}

impl EncodeProcessor for () {
    #[inline]
    fn try_encode(
        &self,
        _value: &dyn Reflect,
        _registry: &TypeRegistry,
    ) -> Option<Result<Value, EncodeErrorKind>> {
        None
    }
}

/// User logic consulted by [`DecodeDriver`] before the default decoding of
/// every node.
///
/// Same return value semantics as [`EncodeProcessor`]. A processor that
/// returns a value must return one of the type described by `info`.
///
/// [`DecodeDriver`]: crate::marshal::DecodeDriver
pub trait DecodeProcessor {
    fn try_decode(
        &mut self,
        info: &'static TypeInfo,
        value: &Value,
        registry: &TypeRegistry,
    ) -> Option<Result<Box<dyn Reflect>, DecodeErrorKind>>;
}

impl DecodeProcessor for () {
    #[inline]
    fn try_decode(
        &mut self,
        _info: &'static TypeInfo,
        _value: &Value,
        _registry: &TypeRegistry,
    ) -> Option<Result<Box<dyn Reflect>, DecodeErrorKind>> {
        None
    }
}
