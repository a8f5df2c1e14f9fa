use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::marshal::DecodeErrorKind;
use crate::ops::{Opaque, ReflectRef};
use crate::value::Value;

// A field declared as `Value` holds an already-encoded subtree. It passes
// through both directions untouched.

impl TypePath for Value {
    #[inline]
    fn type_path() -> &'static str {
        "vc_marshal::value::Value"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Value"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Value"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("vc_marshal::value")
    }
}

impl Typed for Value {
    fn type_info() -> &'static TypeInfo {
        fn from_value(value: &Value) -> Result<Box<dyn Reflect>, DecodeErrorKind> {
            Ok(Box::new(value.clone()))
        }

        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>(from_value)))
    }
}

impl Reflect for Value {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Opaque(self)
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Opaque for Value {
    #[inline]
    fn to_value(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::info::Typed;
    use crate::ops::Opaque;
    use crate::value::{Mapping, Value};

    #[test]
    fn passes_through_unchanged() {
        let mut mapping = Mapping::new();
        mapping.insert("First", Value::Tuple(vec![Value::from("Alice")]));
        let tree = Value::Mapping(mapping);

        assert_eq!(tree.to_value(), tree);

        let info = Value::type_info().as_opaque().unwrap();
        let back = info.from_value(&tree).unwrap();
        assert_eq!(back.downcast_ref::<Value>(), Some(&tree));
    }
}
