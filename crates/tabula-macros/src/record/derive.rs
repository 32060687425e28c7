//! Implementation of the `#[derive(Recordable)]` macro.
//!
//! This macro generates implementations of `Recordable` (the record shape)
//! and `Reflect` (conversion of an instance into a record value).

use proc_macro2::{Ident, TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{doc_comment, parse_container_attrs, parse_field_attrs};

/// Main implementation of the Recordable derive macro.
pub fn recordable_derive_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let struct_name = input.ident.clone();
    let type_name = struct_name.to_string();
    let container = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.clone(),
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Recordable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Recordable can only be derived for structs",
            ))
        }
    };

    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut values: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        if mentions(field.ty.to_token_stream(), &struct_name) {
            return Err(Error::new(
                field.ty.span(),
                format!(
                    "field '{}' refers to '{}' itself; recursive records have no finite shape, \
                     mark the field #[record(skip)]",
                    field_ident, struct_name
                ),
            ));
        }

        let rust_name = field_ident.to_string();
        let column = match (attrs.rename, container.rename_all) {
            (Some(name), _) => name,
            (None, Some(rule)) => rule.apply(&rust_name),
            (None, None) => rust_name.strip_prefix("r#").unwrap_or(&rust_name).to_string(),
        };
        if seen.contains(&column) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{}'", column),
            ));
        }
        seen.push(column.clone());

        let doc = match attrs.doc.or_else(|| doc_comment(&field.attrs)) {
            Some(doc) => quote! { ::std::option::Option::Some(#doc) },
            None => quote! { ::std::option::Option::None },
        };
        let ty = &field.ty;

        descriptors.push(quote! {
            ::tabula_reflect::FieldDescriptor::new(
                #column,
                <#ty as ::tabula_reflect::Reflect>::reflect_type(),
            )
            .with_doc(#doc)
        });
        values.push(quote! {
            ::tabula_reflect::Reflect::reflect(&self.#field_ident)
        });
    }

    // Type parameters must be reflectable for their fields to be.
    let type_params: Vec<_> = input
        .generics
        .type_params()
        .map(|p| p.ident.clone())
        .collect();
    let is_generic = !type_params.is_empty() || input.generics.const_params().next().is_some();
    {
        let where_clause = input.generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::tabula_reflect::Reflect));
        }
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let build_shape = quote! {
        ::std::sync::Arc::new(::tabula_reflect::Shape::named(
            #type_name,
            ::std::vec![#(#descriptors),*],
        ))
    };

    // Statics cannot depend on type parameters, so generic structs rebuild
    // their shape on every call.
    let shape_body = if is_generic {
        build_shape
    } else {
        quote! {
            static SHAPE: ::std::sync::OnceLock<::std::sync::Arc<::tabula_reflect::Shape>> =
                ::std::sync::OnceLock::new();
            SHAPE.get_or_init(|| #build_shape).clone()
        }
    };

    let expanded = quote! {
        impl #impl_generics ::tabula_reflect::Recordable for #struct_name #ty_generics #where_clause {
            fn shape() -> ::std::sync::Arc<::tabula_reflect::Shape> {
                #shape_body
            }
        }

        impl #impl_generics ::tabula_reflect::Reflect for #struct_name #ty_generics #where_clause {
            fn reflect_type() -> ::tabula_reflect::Type {
                ::tabula_reflect::Type::Record(
                    <Self as ::tabula_reflect::Recordable>::shape(),
                )
            }

            fn reflect(&self) -> ::tabula_reflect::Value {
                ::tabula_reflect::Value::Record(::tabula_reflect::Record::new(
                    <Self as ::tabula_reflect::Recordable>::shape(),
                    ::std::vec![#(#values),*],
                ))
            }
        }
    };

    Ok(expanded)
}

/// True if `tokens` name `ident` or `Self` anywhere, including inside
/// generic arguments.
fn mentions(tokens: TokenStream, ident: &Ident) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(i) => i == *ident || i == "Self",
        TokenTree::Group(g) => mentions(g.stream(), ident),
        _ => false,
    })
}
