use crate::derive_data::ReflectMeta;

/// Generate the `inventory` submission of `#[reflect(auto_register)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> proc_macro2::TokenStream {
    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };

    // Which instantiations exist is unknown here.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let auto_register_ = crate::path::auto_register_(meta.vc_marshal_path());
    let real_ident = meta.real_ident();

    quote::quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                #auto_register_::__register::<#real_ident>
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
