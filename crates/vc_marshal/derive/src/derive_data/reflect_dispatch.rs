use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, LitStr, Type};

use super::ReflectMeta;

/// One `Variant(Member)` of a dispatch enum.
pub(crate) struct DispatchMember<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The mapping key whose presence selects this member.
    pub key: LitStr,
}

/// An enum marked `#[reflect(dispatch)]`.
pub(crate) struct ReflectDispatch<'a> {
    meta: ReflectMeta<'a>,
    members: Vec<DispatchMember<'a>>,
}

impl<'a> ReflectDispatch<'a> {
    pub fn new(meta: ReflectMeta<'a>, members: Vec<DispatchMember<'a>>) -> Self {
        let mut val = Self { meta, members };

        let active_types = val.members.iter().map(|m| m.ty.clone()).collect();
        val.meta.set_active_types(active_types);

        val
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn members(&self) -> &[DispatchMember<'a>] {
        &self.members
    }

    /// Generates the `TypeInfo::Dispatch(..)` expression.
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_marshal_path = self.meta.vc_marshal_path();

        let type_info_ = crate::path::type_info_(vc_marshal_path);
        let dispatch_info_ = crate::path::dispatch_info_(vc_marshal_path);
        let candidate_ = crate::path::dispatch_candidate_(vc_marshal_path);
        let reflect_ = crate::path::reflect_(vc_marshal_path);
        let macro_utils_ = crate::path::macro_utils_(vc_marshal_path);

        let candidates = self.members.iter().map(|member| {
            let DispatchMember { ident, ty, key } = member;
            let name = ident.to_string();

            quote! {
                #candidate_::new::<#ty>(
                    #name,
                    #key,
                    |__member: #macro_utils_::Box<dyn #reflect_>| {
                        #macro_utils_::__wrap_member::<#ty, Self>(__member, #name, Self::#ident)
                    },
                )
            }
        });

        quote! {
            #type_info_::Dispatch(
                #dispatch_info_::new::<Self>(&[ #(#candidates),* ])
            )
        }
    }
}
