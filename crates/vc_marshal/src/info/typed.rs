use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the [`TypeInfo`] descriptor of a type.
///
/// Automatically implemented by [`derive::Reflect`]. Manual implementations
/// should store the descriptor in a [`NonGenericTypeInfoCell`] (or a
/// [`GenericTypeInfoCell`] for generic types) so it is built exactly once:
///
/// ```
/// use vc_marshal::Reflect;
/// use vc_marshal::derive::Reflect;
/// use vc_marshal::impls::NonGenericTypeInfoCell;
/// use vc_marshal::info::{NamedField, StructInfo, TypeInfo, Typed};
/// use vc_marshal::ops::{ConstructError, DynamicStruct};
///
/// #[derive(Reflect)]
/// #[reflect(Typed = false)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// fn construct(mut fields: DynamicStruct) -> Result<Box<dyn Reflect>, ConstructError> {
///     let x = fields.take("x")?;
///     let y = fields.take("y")?;
///     Ok(Box::new(Point { x, y }))
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(
///                 &[NamedField::new::<i32>("x"), NamedField::new::<i32>("y")],
///                 construct,
///             ))
///         })
///     }
/// }
///
/// let info = Point::type_info().as_struct().unwrap();
/// assert_eq!(info.field_names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
///
/// [`derive::Reflect`]: crate::derive::Reflect
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the static descriptor of this type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], auto-implemented.
pub trait DynamicTyped {
    /// Returns the descriptor of the concrete type behind a `dyn Reflect`.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
