use std::collections::{HashMap, HashSet};

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, GenericArgument, Ident, LitStr, Pat,
    PathArguments, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_message(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromMessage` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromMessage` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    type Case = (Ident, Option<(Type, ExprClosure)>);
    let mut field_methods: HashMap<Primitive, Vec<(LitStr, Case)>> = HashMap::new();
    let mut seen: HashSet<(Primitive, String)> = HashSet::new();
    let mut header_method: Option<Case> = None;

    for field in fields {
        let assignment = (field.name, field.handler);

        match field.identifier {
            FieldIdentifier::Name(name) => {
                let primitive = Primitive::of(&field.primitive)?;

                if !seen.insert((primitive, name.value())) {
                    Err(Error::new(name.span(), "Field names must be unique."))?
                }

                field_methods
                    .entry(primitive)
                    .or_default()
                    .push((name, assignment));
            }
            FieldIdentifier::Header => {
                let existing = header_method.replace(assignment);

                if existing.is_some() {
                    Err(Error::new(
                        field.span,
                        "Only one field may receive the header.",
                    ))?;
                }
            }
        }
    }

    let field_methods = field_methods.into_iter().map(|(primitive, fields)| {
        let cases = fields.into_iter().map(|(name, (ident, handler))| {
            let assignment = if let Some((field_type, handler)) = handler {
                accumulate(&ident, &field_type, handler)
            } else {
                let value = primitive.owned();

                quote! {
                    self.#ident = Some(#value)
                }
            };

            quote! { #name => { #assignment } }
        });

        let method = format_ident!("add_{}", primitive.suffix());
        let value_type = primitive.value_type();

        quote! {
            fn #method(&mut self, field: &str, value: #value_type) {
                match field {
                    #(#cases)*
                    _ => {}
                };
            }
        }
    });

    let header_method = header_method.map(|(ident, handler)| {
        let assignment = if let Some((field_type, handler)) = handler {
            accumulate(&ident, &field_type, handler)
        } else {
            quote! { self.#ident = Some(value) }
        };

        quote! {
            fn add_header(&mut self, value: ::aisling::sans::header::MessageHeader) {
                #assignment;
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl FromMessage for #name {
            #(#field_methods)*
            #header_method
        }
    };

    Ok(expanded.into())
}

/// Invoke an accumulator closure on a struct field with the received value.
fn accumulate(ident: &Ident, field_type: &Type, handler: ExprClosure) -> TokenStream2 {
    let ExprClosure { inputs, body, .. } = handler;
    let mut inputs = inputs.into_iter();
    let (acc, val) = (inputs.next(), inputs.next());

    quote! {
        (|#acc: &mut #field_type, #val| { #body })(&mut self.#ident, value)
    }
}

/// Kind of value received for a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Primitive {
    Integer,
    Float,
    Text,
    Boolean,
}

impl Primitive {
    fn of(ty: &Type) -> Result<Self> {
        let unsupported = || {
            Error::new_spanned(
                ty,
                "Field values must be `i64`, `f64`, `bool`, `String` or `&str`.",
            )
        };

        match ty {
            Type::Reference(reference) => match &*reference.elem {
                Type::Path(path) if path.path.is_ident("str") => Ok(Self::Text),
                _ => Err(unsupported()),
            },
            Type::Path(path) => {
                let Some(segment) = path.path.segments.last() else {
                    Err(unsupported())?
                };

                match segment.ident.to_string().as_str() {
                    "i64" => Ok(Self::Integer),
                    "f64" => Ok(Self::Float),
                    "String" => Ok(Self::Text),
                    "bool" => Ok(Self::Boolean),
                    _ => Err(unsupported()),
                }
            }
            _ => Err(unsupported()),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
        }
    }

    fn value_type(self) -> TokenStream2 {
        match self {
            Self::Integer => quote! { i64 },
            Self::Float => quote! { f64 },
            Self::Text => quote! { &str },
            Self::Boolean => quote! { bool },
        }
    }

    /// Expression storing a received value without an accumulator.
    fn owned(self) -> TokenStream2 {
        match self {
            Self::Text => quote! { value.to_owned() },
            _ => quote! { value },
        }
    }
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    primitive: Type,
    identifier: FieldIdentifier,
    handler: Option<(Type, ExprClosure)>,
    span: Span,
}

#[derive(Debug)]
enum FieldIdentifier {
    Name(LitStr),
    Header,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let span = attr.span();

        let FieldAttribute {
            identifier,
            handler,
        } = attr.meta.require_list()?.parse_args()?;

        let primitive = match &handler {
            Some(handler) => closure_value_type(handler)?,
            None => option_inner(&field.ty)?,
        };

        let handler = handler.map(|h| (field.ty.clone(), h));

        Ok(Some(Self {
            name,
            primitive,
            identifier,
            handler,
            span,
        }))
    }
}

/// Type annotated on the value parameter of an accumulator closure.
fn closure_value_type(handler: &ExprClosure) -> Result<Type> {
    match handler.inputs.iter().nth(1) {
        Some(Pat::Type(value)) => Ok((*value.ty).clone()),
        Some(parameter) => Err(Error::new_spanned(
            parameter,
            "Handler closure's second parameter must be annotated with the expected value type.",
        )),
        None => Err(Error::new_spanned(
            handler,
            "Handler closure must have two parameters.",
        )),
    }
}

/// Inner type of an `Option<T>` field.
fn option_inner(ty: &Type) -> Result<Type> {
    let segment = match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    };

    let argument = segment
        .filter(|s| s.ident == "Option")
        .and_then(|s| match &s.arguments {
            PathArguments::AngleBracketed(arguments) => arguments.args.first(),
            _ => None,
        });

    match argument {
        Some(GenericArgument::Type(inner)) => Ok(inner.clone()),
        _ => Err(Error::new_spanned(
            ty,
            "Field without a handler must have type `Option<T>`.",
        )),
    }
}

#[derive(Debug)]
struct FieldAttribute {
    identifier: FieldIdentifier,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let identifier = if input.peek(LitStr) {
            FieldIdentifier::Name(input.parse::<LitStr>()?)
        } else {
            let ident = input.parse::<Ident>()?;
            if ident == "header" {
                FieldIdentifier::Header
            } else {
                Err(Error::new_spanned(
                    ident,
                    "Field identifier must be a string literal or `header`.",
                ))?
            }
        };

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self {
            identifier,
            handler,
        })
    }
}
