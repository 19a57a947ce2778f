//! Procedural macros for graphql-builder
//!
//! This crate declares the field-mapping metadata that `graphql-builder`
//! reads when building queries and parsing responses:
//!
//! - `#[derive(GraphQLModel)]` - Static field table and JSON assignment for a struct
//! - `#[derive(GraphQLEnum)]` - Name-based conversion for a unit-variant enum

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Token, parse_macro_input};

/// Generate `GraphQLModel` and `GraphQLValue` for a struct with named fields.
///
/// # Usage
///
/// ```ignore
/// #[derive(GraphQLModel, Default)]
/// #[graphql(schema_type = "blog_post", rename_all = "camelCase")]
/// pub struct BlogPost {
///     #[graphql(field = "title")]
///     pub title: String,
///
///     // Schema name derived from the ident: "viewCount"
///     #[graphql(field)]
///     pub view_count: i32,
///
///     // Carries a mapping but is left out unless re-added on the builder
///     #[graphql(field = "body", ignore)]
///     pub body: String,
///
///     // Not visible to the builder at all
///     #[graphql(skip)]
///     pub cache: std::collections::HashMap<String, String>,
///
///     // Unmapped, can be mapped later with `add_field_mapping`
///     pub notes: String,
/// }
/// ```
///
/// Every non-skipped field type must implement `GraphQLValue`.
#[proc_macro_derive(GraphQLModel, attributes(graphql))]
pub fn derive_graphql_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_model(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generate `GraphQLEnumValue`, `GraphQLValue` and `From<_> for ArgumentValue`
/// for an enum whose variants are all units.
///
/// Members are rendered and parsed by their variant name.
#[proc_macro_derive(GraphQLEnum)]
pub fn derive_graphql_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Container options from `#[graphql(...)]` on the struct
#[derive(Default)]
struct ModelOptions {
    schema_type: Option<String>,
    rename_all: Option<Case>,
}

/// Field options from `#[graphql(...)]` on a field
#[derive(Default)]
struct FieldOptions {
    /// `Some(None)` for a bare `field`, name derived from the ident
    field: Option<Option<String>>,
    ignore: bool,
    skip: bool,
}

fn parse_case(lit: &LitStr) -> syn::Result<Case> {
    let case = match lit.value().as_str() {
        "lowercase" => Case::Flat,
        "UPPERCASE" => Case::UpperFlat,
        "camelCase" => Case::Camel,
        "PascalCase" => Case::Pascal,
        "snake_case" => Case::Snake,
        "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
        "kebab-case" => Case::Kebab,
        _ => return Err(syn::Error::new(lit.span(), "unsupported rename_all case")),
    };
    Ok(case)
}

fn parse_model_options(input: &DeriveInput) -> syn::Result<ModelOptions> {
    let mut options = ModelOptions::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("graphql")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("schema_type") {
                let lit: LitStr = meta.value()?.parse()?;
                options.schema_type = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename_all = Some(parse_case(&lit)?);
                Ok(())
            } else {
                Err(meta.error("expected `schema_type` or `rename_all`"))
            }
        })?;
    }
    Ok(options)
}

fn parse_field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("graphql")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    options.field = Some(Some(lit.value()));
                } else {
                    options.field = Some(None);
                }
                Ok(())
            } else if meta.path.is_ident("ignore") {
                options.ignore = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `field`, `ignore` or `skip`"))
            }
        })?;
    }
    Ok(options)
}

fn expand_model(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "GraphQLModel cannot be derived for generic types",
        ));
    }

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            // No accessible fields, resolves to an empty table
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "GraphQLModel requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "GraphQLModel can only be derived for structs",
            ));
        }
    };

    let options = parse_model_options(input)?;
    let type_name = name.unraw().to_string();
    let schema_type = match &options.schema_type {
        Some(schema_type) => quote! { ::core::option::Option::Some(#schema_type) },
        None => quote! { ::core::option::Option::None },
    };

    let mut metas = Vec::new();
    let mut assignments = Vec::new();

    for field in fields {
        let field_options = parse_field_options(field)?;
        if field_options.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let source_name = ident.unraw().to_string();

        let field_name = match field_options.field {
            Some(Some(explicit)) => quote! { ::core::option::Option::Some(#explicit) },
            Some(None) => {
                let derived = match options.rename_all {
                    Some(case) => source_name.to_case(case),
                    None => source_name.clone(),
                };
                quote! { ::core::option::Option::Some(#derived) }
            }
            None => quote! { ::core::option::Option::None },
        };
        let ignored = field_options.ignore;

        metas.push(quote! {
            ::graphql_builder::FieldMeta {
                source_name: #source_name,
                field_name: #field_name,
                ignored: #ignored,
                shape: <#ty as ::graphql_builder::GraphQLValue>::shape,
            }
        });

        assignments.push(quote! {
            #source_name => {
                self.#ident = <#ty as ::graphql_builder::GraphQLValue>::from_json(raw, path)?;
            }
        });
    }

    Ok(quote! {
        impl ::graphql_builder::GraphQLModel for #name {
            const TYPE_NAME: &'static str = #type_name;
            const SCHEMA_TYPE: ::core::option::Option<&'static str> = #schema_type;

            fn fields() -> &'static [::graphql_builder::FieldMeta] {
                static FIELDS: &[::graphql_builder::FieldMeta] = &[#(#metas),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn assign_field(
                &mut self,
                source_name: &str,
                raw: &::graphql_builder::__private::Value,
                path: &str,
            ) -> ::graphql_builder::ParseResult<()> {
                match source_name {
                    #(#assignments)*
                    _ => {}
                }
                ::core::result::Result::Ok(())
            }
        }

        impl ::graphql_builder::GraphQLValue for #name {
            fn shape() -> ::graphql_builder::ValueShape {
                ::graphql_builder::ValueShape::Composite(
                    <#name as ::graphql_builder::GraphQLModel>::fields,
                )
            }

            fn from_json(
                raw: &::graphql_builder::__private::Value,
                path: &str,
            ) -> ::graphql_builder::ParseResult<Self> {
                ::graphql_builder::populate::<#name>(raw, path)
            }
        }
    })
}

fn expand_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "GraphQLEnum cannot be derived for generic types",
        ));
    }

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "GraphQLEnum can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "GraphQLEnum requires at least one variant",
        ));
    }

    let mut members = Vec::new();
    let mut to_name = Vec::new();
    let mut from_name = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "GraphQLEnum variants cannot carry data",
            ));
        }
        let ident = &variant.ident;
        let member = ident.unraw().to_string();

        members.push(quote! { #member });
        to_name.push(quote! { #name::#ident => #member });
        from_name.push(quote! { #member => ::core::option::Option::Some(#name::#ident) });
    }

    Ok(quote! {
        impl ::graphql_builder::GraphQLEnumValue for #name {
            const MEMBERS: &'static [&'static str] = &[#(#members),*];

            fn name(&self) -> &'static str {
                match self {
                    #(#to_name,)*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#from_name,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::graphql_builder::GraphQLValue for #name {
            fn shape() -> ::graphql_builder::ValueShape {
                ::graphql_builder::ValueShape::Enum
            }

            fn from_json(
                raw: &::graphql_builder::__private::Value,
                path: &str,
            ) -> ::graphql_builder::ParseResult<Self> {
                ::graphql_builder::__private::enum_from_json::<#name>(raw, path)
            }
        }

        impl ::core::convert::From<#name> for ::graphql_builder::ArgumentValue {
            fn from(value: #name) -> Self {
                ::graphql_builder::ArgumentValue::from_enum(value)
            }
        }
    })
}
