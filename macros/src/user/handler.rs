//! `#[derive(Handler)]`
//!
//! Implements `tola_dispatch::Handler` by pointing both accessors at the
//! struct's label field. The field is chosen in this order:
//!
//! 1. the field marked `#[label]`
//! 2. the field named `label`
//! 3. the only field of a single-field struct

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member};

use crate::common::has_marker;

pub fn expand_derive_handler(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "#[derive(Handler)] only supports structs; \
                 use `handler_set!` to combine several handlers",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "#[derive(Handler)] only supports structs",
            ));
        }
    };

    let member = label_member(fields, ident)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::tola_dispatch::Handler for #ident #ty_generics #where_clause {
            #[inline]
            fn impl_name(&mut self) -> &mut ::tola_dispatch::Label {
                &mut self.#member
            }

            #[inline]
            fn impl_label(&self) -> &::tola_dispatch::Label {
                &self.#member
            }
        }
    })
}

fn member_at(fields: &Fields, index: usize) -> Member {
    let field = fields.iter().nth(index);
    match field.and_then(|f| f.ident.clone()) {
        Some(name) => Member::Named(name),
        None => Member::Unnamed(Index { index: index as u32, span: Span::call_site() }),
    }
}

fn label_member(fields: &Fields, ident: &syn::Ident) -> syn::Result<Member> {
    let mut marked = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if has_marker(&field.attrs, "label")? {
            marked.push((i, field));
        }
    }

    match marked.as_slice() {
        [(i, _)] => return Ok(member_at(fields, *i)),
        [_, (_, second), ..] => {
            return Err(syn::Error::new_spanned(
                second,
                "only one field may be marked #[label]",
            ));
        }
        [] => {}
    }

    if let Some(i) = fields
        .iter()
        .position(|f| f.ident.as_ref().is_some_and(|name| name == "label"))
    {
        return Ok(member_at(fields, i));
    }

    if fields.len() == 1 {
        return Ok(member_at(fields, 0));
    }

    Err(syn::Error::new_spanned(
        ident,
        format!(
            "cannot find the label field of `{ident}`\n\
             \n\
             Mark it with #[label], name it `label`, or use a single-field struct."
        ),
    ))
}
