use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result};

use crate::shape::{FieldShape, shape_of};

pub(crate) struct ParsedRecord {
    name: Ident,
    namespace: String,
    fields: Vec<ParsedField>,
}

struct ParsedField {
    name: String,
    shape: FieldShape,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(Error::new(
                input.generics.span(),
                "SearchIndexed cannot be derived for generic types",
            ));
        }

        let mut namespace: Option<String> = None;
        for attr in &input.attrs {
            if attr.path().is_ident("search") {
                Self::parse_container_attr(attr, &mut namespace)?;
            }
        }
        let namespace = namespace.ok_or_else(|| {
            Error::new(
                input.ident.span(),
                "SearchIndexed requires #[search(namespace = \"...\")]",
            )
        })?;

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(ParsedField::from_field)
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(Error::new(input.ident.span(), "SearchIndexed requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "SearchIndexed can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            namespace,
            fields,
        })
    }

    fn parse_container_attr(attr: &Attribute, namespace: &mut Option<String>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(Error::new(value.span(), "namespace must not be empty"));
                }
                *namespace = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown search attribute, expected `namespace`"))
            }
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let type_name = LitStr::new(&self.name.to_string(), Span::call_site());
        let namespace = LitStr::new(&self.namespace, Span::call_site());

        let field_specs = self.fields.iter().map(|field| {
            let field_name = &field.name;
            let kind = field.shape.to_tokens();
            quote! {
                ::ftgen::FieldSpec {
                    name: #field_name,
                    kind: #kind,
                }
            }
        });

        quote! {
            impl ::ftgen::SearchIndexed for #name {
                const NAMESPACE: &'static str = #namespace;
                const TYPE_NAME: &'static str = #type_name;

                fn field_specs() -> &'static [::ftgen::FieldSpec] {
                    const FIELDS: &[::ftgen::FieldSpec] = &[#(#field_specs),*];
                    FIELDS
                }
            }

            ::ftgen::inventory::submit! {
                ::ftgen::RegisteredType {
                    namespace: #namespace,
                    type_name: #type_name,
                    fields: <#name as ::ftgen::SearchIndexed>::field_specs,
                }
            }
        }
    }
}

impl ParsedField {
    fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(Span::call_site(), "SearchIndexed requires named fields"))?;

        let mut shape = None;
        for attr in &field.attrs {
            if attr.path().is_ident("search") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("kind") {
                        let value: LitStr = meta.value()?.parse()?;
                        shape = Some(FieldShape::from_override(&value.value()).ok_or_else(|| {
                            Error::new(
                                value.span(),
                                "unknown kind, expected one of `scalar`, `vector`, `collection`, `opaque`",
                            )
                        })?);
                        Ok(())
                    } else {
                        Err(meta.error("unknown search field attribute, expected `kind`"))
                    }
                })?;
            }
        }

        Ok(Self {
            name: unraw(ident),
            shape: shape.unwrap_or_else(|| shape_of(&field.ty)),
        })
    }
}

/// Field name as serialised: `r#type` becomes `type`.
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}
