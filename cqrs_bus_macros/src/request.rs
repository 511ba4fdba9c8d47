use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr};

/// Which side of the bus a derived request lands on.
#[derive(Clone, Copy)]
pub enum Kind {
    Command,
    Query,
}

pub fn derive_request(input: TokenStream, kind: Kind) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let type_name = match extract_type_name(&input) {
        Ok(type_name) => type_name,
        Err(err) => return err.to_compile_error().into(),
    };

    let kind = match kind {
        Kind::Command => quote! { ::cqrs_bus::RequestKind::Command },
        Kind::Query => quote! { ::cqrs_bus::RequestKind::Query },
    };

    let expanded = quote! {
        impl #impl_generics ::cqrs_bus::RequestType for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const KIND: ::cqrs_bus::RequestKind = #kind;
        }

        impl #impl_generics ::cqrs_bus::Request for #name #ty_generics #where_clause {
            fn request_type(&self) -> &'static str {
                <Self as ::cqrs_bus::RequestType>::TYPE_NAME
            }

            fn kind(&self) -> ::cqrs_bus::RequestKind {
                <Self as ::cqrs_bus::RequestType>::KIND
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[request(name = "...")]`, falling back to the type's ident.
fn extract_type_name(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("request") {
            continue;
        }

        let mut type_name = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(meta.error("request name must not be empty"));
                }
                type_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported request attribute, expected `name = \"...\"`"))
            }
        })?;

        if let Some(type_name) = type_name {
            return Ok(type_name);
        }
    }

    Ok(input.ident.to_string())
}
