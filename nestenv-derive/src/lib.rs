//! Derive macro implementation for nestenv

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam};

mod attrs;

use attrs::{ContainerAttrs, FieldAttrs};

/// `Decode` derive macro
///
/// Implements `nestenv::Decode`, `nestenv::RecordTarget` and
/// `nestenv::FromEnv` on structs with named fields.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "ACME")]`: Prefix of all variables read by `from_env()`
/// - `#[env(separator = "__")]`: Separator between name segments (default `_`)
/// - `#[env(case = "upper")]`: Case policy, `none`, `upper` or `lower`
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Name segment instead of the field name
/// - `#[env(skip)]`: Leave the field untouched
/// - `#[env(deserializer = "func")]`: Parse the field with a custom function
///
/// Skipped and custom-deserialized fields start from `Default::default()` when
/// the struct is built from scratch; every other field starts from its
/// `Decode::placeholder()`.
///
/// # Example
///
/// See the `nestenv` crate documentation for usage examples.
#[proc_macro_derive(Decode, attributes(env))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Decode only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Decode only supports structs",
            ));
        }
    };

    let mut names = Vec::new();
    let mut arms = Vec::new();
    let mut placeholders = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Decode requires named fields"));
        };

        // fields the engine does not decode by shape start from their Default
        placeholders.push(if attrs.skip || attrs.deserializer.is_some() {
            quote!(#ident: ::std::default::Default::default())
        } else {
            quote!(#ident: ::nestenv::Decode::placeholder())
        });
        if attrs.skip {
            continue;
        }
        let name = attrs.name.unwrap_or_else(|| {
            let ident = ident.to_string();
            ident.strip_prefix("r#").map(str::to_string).unwrap_or(ident)
        });

        let index = names.len();
        let target = match attrs.deserializer {
            Some(func) => quote! {
                ::nestenv::Target::Leaf(::std::boxed::Box::new(
                    ::nestenv::de::With::new(&mut self.#ident, |raw: &str| #func(raw))
                ))
            },
            None => quote! {
                ::nestenv::Decode::target(&mut self.#ident)
            },
        };
        arms.push(quote! {
            #index => ::std::option::Option::Some(#target),
        });
        names.push(name);
    }

    // Decodable type parameters are required to decode their fields
    for param in &mut input.generics.params {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(::nestenv::Decode));
        }
    }

    let ident = &input.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let prefix = container.prefix.unwrap_or_default();
    let separator = container.separator.unwrap_or_else(|| "_".to_string());
    let case = match container.case.as_deref() {
        Some("upper") => quote!(::nestenv::Case::Upper),
        Some("lower") => quote!(::nestenv::Case::Lower),
        _ => quote!(::nestenv::Case::None),
    };

    Ok(quote! {
        impl #impl_generics ::nestenv::Decode for #ident #ty_generics #where_clause {
            fn shape() -> ::nestenv::Shape {
                ::nestenv::Shape::Record { name: #type_name }
            }

            fn placeholder() -> Self {
                Self {
                    #(#placeholders),*
                }
            }

            fn target(&mut self) -> ::nestenv::Target<'_> {
                ::nestenv::Target::Record(self)
            }
        }

        impl #impl_generics ::nestenv::RecordTarget for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn field(&mut self, index: usize) -> ::std::option::Option<::nestenv::Target<'_>> {
                match index {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics ::nestenv::FromEnv for #ident #ty_generics #where_clause {
            const PREFIX: &'static str = #prefix;
            const SEPARATOR: &'static str = #separator;
            const CASE: ::nestenv::Case = #case;
        }
    })
}
