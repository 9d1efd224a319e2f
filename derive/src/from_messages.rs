use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, Result, Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

pub(crate) fn expand_from_messages(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromMessages` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromMessages` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for number in fields.iter().flat_map(|f| &f.numbers) {
        if !seen.insert(number.base10_parse::<u8>()?) {
            Err(Error::new(
                number.span(),
                "Message types must be unique.",
            ))?
        }
    }

    let cases = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            numbers,
            collection,
        } = field;

        let assignment = match collection {
            Collection::Latest => quote! {
                Some(self.#name.insert(Default::default()))
            },
            Collection::Every => quote! {
                self.#name.push(Default::default());
                self.#name.last_mut().map(|m| m as _)
            },
        };

        quote! { #(#numbers)|* => { #assignment } }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl FromMessages for #name {
            fn add_message(&mut self, message_id: u8) -> Option<&mut dyn FromMessage> {
                match message_id {
                    #(#cases)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    numbers: Vec<LitInt>,
    collection: Collection,
}

/// How a field stores the messages routed to it.
#[derive(Debug, Clone, Copy)]
enum Collection {
    /// `Option<T>`, keeping the latest message.
    Latest,
    /// `Vec<T>`, keeping every message.
    Every,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("message")) else {
            return Ok(None);
        };

        let MessageAttribute { numbers } = attr.meta.require_list()?.parse_args()?;

        let outer = match &field.ty {
            Type::Path(path) => path.path.segments.last().map(|s| &s.ident),
            _ => None,
        };

        let collection = match outer {
            Some(ident) if ident == "Option" => Collection::Latest,
            Some(ident) if ident == "Vec" => Collection::Every,
            _ => Err(Error::new_spanned(
                &field.ty,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            ))?,
        };

        Ok(Some(Self {
            name,
            numbers,
            collection,
        }))
    }
}

#[derive(Debug)]
struct MessageAttribute {
    numbers: Vec<LitInt>,
}

impl Parse for MessageAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let numbers = Punctuated::<LitInt, Token![,]>::parse_terminated(input)?;

        if numbers.is_empty() {
            Err(input.error("At least one message type is required."))?
        }

        Ok(Self {
            numbers: numbers.into_iter().collect(),
        })
    }
}
