//! `handler_set!` - closed handler set construction
//!
//! ```ignore
//! handler_set! {
//!     /// Doc comments and attributes are forwarded.
//!     pub enum AnyHandler {
//!         D1,                // alternative `D1` holding handler type `D1`
//!         Remote(net::D2),   // alternative `Remote` holding handler type `net::D2`
//!     }
//! }
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Ident, Token, Type, Visibility, braced, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token,
};

use crate::common::check_duplicates;

// =============================================================================
// Input Parser
// =============================================================================

/// One alternative: `Name` or `Name(Type)`.
pub struct VariantDef {
    pub attrs: Vec<Attribute>,
    pub name: Ident,
    pub ty: Type,
}

impl Parse for VariantDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let name: Ident = input.parse()?;
        let ty = if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            content.parse()?
        } else {
            syn::parse_quote!(#name)
        };
        Ok(VariantDef { attrs, name, ty })
    }
}

pub struct HandlerSetInput {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub variants: Punctuated<VariantDef, Token![,]>,
}

impl Parse for HandlerSetInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![enum]>()?;
        let ident: Ident = input.parse()?;

        let content;
        braced!(content in input);
        let variants = content.parse_terminated(VariantDef::parse, Token![,])?;

        Ok(HandlerSetInput { attrs, vis, ident, variants })
    }
}

// =============================================================================
// Expansion
// =============================================================================

pub fn expand_handler_set(input: HandlerSetInput) -> syn::Result<TokenStream2> {
    let HandlerSetInput { attrs, vis, ident, variants } = input;

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ident,
            format!("handler set `{ident}` must list at least one handler"),
        ));
    }

    let names: Vec<&Ident> = variants.iter().map(|v| &v.name).collect();
    let tys: Vec<&Type> = variants.iter().map(|v| &v.ty).collect();
    let name_strs: Vec<String> = names.iter().map(|n| n.to_string()).collect();

    check_duplicates(&names, "variant", &ident)?;
    check_duplicates(&tys, "handler type", &ident)?;

    let ident_str = ident.to_string();
    let own = quote! { ::tola_dispatch::Ownership };

    let alternatives = variants.iter().map(|v| {
        let VariantDef { attrs, name, ty } = v;
        quote! {
            #(#attrs)*
            #name(<O as #own>::Handle<#ty>),
        }
    });

    let members = names.iter().zip(&tys).map(|(name, ty)| {
        quote! {
            #[automatically_derived]
            #[allow(unreachable_patterns)]
            impl<O: #own> ::tola_dispatch::Member<#ident<O>> for #ty {
                #[inline]
                fn into_set(handle: ::tola_dispatch::HandleOf<#ident<O>, #ty>) -> #ident<O> {
                    #ident::#name(handle)
                }

                #[inline]
                fn from_set(
                    set: &#ident<O>,
                ) -> ::core::option::Option<&::tola_dispatch::HandleOf<#ident<O>, #ty>> {
                    match set {
                        #ident::#name(handle) => ::core::option::Option::Some(handle),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        }
    });

    Ok(quote! {
        #(#attrs)*
        #vis enum #ident<O: #own = ::tola_dispatch::Local> {
            #(#alternatives)*
        }

        #[automatically_derived]
        impl<O: #own> ::core::clone::Clone for #ident<O> {
            fn clone(&self) -> Self {
                match self {
                    #(Self::#names(handle) => Self::#names(::core::clone::Clone::clone(handle)),)*
                }
            }
        }

        #[automatically_derived]
        impl<O: #own> ::core::fmt::Debug for #ident<O> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#ident_str)
                    .field(&::tola_dispatch::HandlerSet::variant(self))
                    .finish()
            }
        }

        #[automatically_derived]
        impl<O: #own> ::tola_dispatch::HandlerSet for #ident<O> {
            type Ownership = O;

            const VARIANTS: &'static [&'static str] = &[#(#name_strs),*];

            fn variant(&self) -> &'static str {
                match self {
                    #(Self::#names(_) => #name_strs,)*
                }
            }

            fn with_label<R>(
                &self,
                f: impl ::core::ops::FnOnce(&mut ::tola_dispatch::Label) -> R,
            ) -> ::tola_dispatch::Result<R> {
                match self {
                    #(Self::#names(handle) => <O as #own>::with_name::<#tys, R>(handle, f),)*
                }
            }

            #[allow(unreachable_patterns)]
            fn same_handler(&self, other: &Self) -> bool {
                match (self, other) {
                    #((Self::#names(a), Self::#names(b)) => <O as #own>::same::<#tys>(a, b),)*
                    _ => false,
                }
            }
        }

        #(#members)*
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: TokenStream2) -> syn::Result<TokenStream2> {
        expand_handler_set(syn::parse2(tokens)?)
    }

    #[test]
    fn test_parse_plain_and_renamed_variants() {
        let input: HandlerSetInput = syn::parse2(quote! {
            pub enum AnyHandler { D1, Remote(net::D2), }
        })
        .unwrap();
        assert_eq!(input.ident, "AnyHandler");
        let names: Vec<String> = input.variants.iter().map(|v| v.name.to_string()).collect();
        assert_eq!(names, ["D1", "Remote"]);
    }

    #[test]
    fn test_rejects_empty_set() {
        let err = expand(quote! { enum Nothing {} }).unwrap_err();
        assert!(err.to_string().contains("at least one handler"));
    }

    #[test]
    fn test_rejects_duplicate_variant_name() {
        let err = expand(quote! { enum Dup { D1, D1(Other) } }).unwrap_err();
        assert!(err.to_string().contains("duplicate variant `D1`"));
    }

    #[test]
    fn test_rejects_duplicate_handler_type() {
        let err = expand(quote! { enum Dup { First(D1), Second(D1) } }).unwrap_err();
        assert!(err.to_string().contains("duplicate handler type `D1`"));
    }

    #[test]
    fn test_expansion_mentions_every_member() {
        let out = expand(quote! { enum Pair { D1, D2 } }).unwrap().to_string();
        assert!(out.contains("Member"));
        assert!(out.contains("for D1"));
        assert!(out.contains("for D2"));
    }
}
