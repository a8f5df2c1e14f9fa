// -----------------------------------------------------------------------------
// Modules

mod match_reflect;

mod dispatch_kind;
mod enum_kind;
mod struct_kind;

mod auto_register;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_reflect::match_reflect_impls;

use auto_register::get_auto_register_impl;
use dispatch_kind::impl_dispatch;
use enum_kind::impl_enum;
use struct_kind::impl_struct;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

pub(crate) use trait_type_path::impl_trait_type_path;
