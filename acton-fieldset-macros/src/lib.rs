//! Procedural macros for acton-fieldset
//!
//! - `#[derive(Form)]` builds a form type's descriptor table from its fields
//!   and their `#[form(...)]` and `#[validate(...)]` attributes
//! - `#[derive(FormEnum)]` exposes a unit-only enum as a closed set of
//!   constants usable in selects, radio groups and checkbox groups

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, LitStr, Token};

/// Derive `acton_fieldset::forms::Form` for a struct with named fields
///
/// Field attributes (`#[form(...)]`):
///
/// - element hints: `select`, `select(fetcher = "key", multiple)`, `radio`,
///   `radio(fetcher = "key")`, `checkbox`, `checkbox(fetcher = "key")`,
///   `textarea`, `textarea(rows = 4, cols = 40)`, `trix_editor`, `tel`, `url`,
///   `password`, `hidden`, `file`, `file(accept = "image/*", multiple)`
/// - constraints: `not_blank`, `not_null`, `required`, `positive`, `email`,
///   `min = ..`, `max = ..`, `length(min = .., max = ..)`, `pattern = ".."`,
///   `placeholder = ".."`
/// - `rename = ".."`, `auto_populated`, `skip`
///
/// `#[validate(...)]` attributes from the `validator` crate are read as well:
/// `length`, `range`, `email`, `url` and `required` become constraints.
///
/// The container attribute `#[form(name = "..")]` overrides the form name used
/// in message codes.
#[proc_macro_derive(Form, attributes(form, validate))]
pub fn derive_form(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_form(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `acton_fieldset::forms::FormEnum` for a unit-only enum
///
/// Constant names default to the variant name in `SCREAMING_SNAKE_CASE`; use
/// `#[form(value = "..")]` on a variant to override it and `#[form(name = "..")]`
/// on the enum to override the type name used in message codes.
#[proc_macro_derive(FormEnum, attributes(form))]
pub fn derive_form_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_form_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
#[allow(clippy::struct_excessive_bools)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
    auto_populated: bool,
    not_blank: bool,
    not_null: bool,
    required: bool,
    positive: bool,
    email: bool,
    url: bool,
    min: Option<Expr>,
    max: Option<Expr>,
    min_length: Option<Expr>,
    max_length: Option<Expr>,
    pattern: Option<Expr>,
    placeholder: Option<LitStr>,
    hint: Option<TokenStream2>,
}

fn container_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = input.ident.to_string();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else {
                Err(meta.error("unsupported container attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}

fn expand_form(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let form_name = container_name(input)?;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "Form can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "Form can only be derived for structs with named fields",
        ));
    };

    let mut descriptors = Vec::new();
    let mut arms = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let options = field_options(field)?;
        if options.skip {
            continue;
        }
        let name = options
            .rename
            .clone()
            .unwrap_or_else(|| field_ident.to_string().trim_start_matches("r#").to_string());
        let ty = &field.ty;

        descriptors.push(field_descriptor(&name, ty, &options));
        arms.push(quote! {
            #name => (&::acton_fieldset::forms::__dispatch::Property::<#ty>(
                ::core::marker::PhantomData,
            ))
                .bind(&self.#field_ident),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[allow(clippy::needless_borrow)]
        impl #impl_generics ::acton_fieldset::forms::Form for #ident #ty_generics #where_clause {
            fn describe() -> ::acton_fieldset::forms::FormDescriptor {
                ::acton_fieldset::forms::FormDescriptor::new(#form_name)
                    #( .field(#descriptors) )*
            }

            fn value_of(
                &self,
                property: &str,
            ) -> ::core::option::Option<::acton_fieldset::forms::FieldValue> {
                #[allow(unused_imports)]
                use ::acton_fieldset::forms::__dispatch::{OpaqueProperty as _, ValueProperty as _};

                match property {
                    #( #arms )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn field_descriptor(name: &str, ty: &syn::Type, options: &FieldOptions) -> TokenStream2 {
    let not_blank = options.not_blank;
    let not_null = options.not_null;
    let required = options.required;
    let positive = options.positive;
    let email = options.email;
    let auto_populated = options.auto_populated;

    let min = optional_string(options.min.as_ref());
    let max = optional_string(options.max.as_ref());
    let pattern = optional_string(options.pattern.as_ref());
    let min_length = optional_u32(options.min_length.as_ref());
    let max_length = optional_u32(options.max_length.as_ref());
    let placeholder = options.placeholder.as_ref().map_or_else(
        || quote!(::core::option::Option::None),
        |p| quote!(::core::option::Option::Some(::std::string::String::from(#p))),
    );

    let hint = options.hint.clone().or_else(|| {
        options
            .url
            .then(|| quote!(::acton_fieldset::forms::FieldHint::Url))
    });
    let hint = hint.map_or_else(
        || quote!(::core::option::Option::None),
        |h| quote!(::core::option::Option::Some(#h)),
    );

    quote! {
        {
            #[allow(unused_imports)]
            use ::acton_fieldset::forms::__dispatch::{OpaqueProperty as _, ValueProperty as _};

            let mut field = (&::acton_fieldset::forms::__dispatch::Property::<#ty>(
                ::core::marker::PhantomData,
            ))
                .descriptor(#name);
            field.hint = #hint;
            field.auto_populated = #auto_populated;
            field.constraints.not_blank = #not_blank;
            field.constraints.not_null = #not_null;
            field.constraints.required = #required;
            field.constraints.positive = #positive;
            field.constraints.email = #email;
            field.constraints.min = #min;
            field.constraints.max = #max;
            field.constraints.min_length = #min_length;
            field.constraints.max_length = #max_length;
            field.constraints.pattern = #pattern;
            field.constraints.placeholder = #placeholder;
            field
        }
    }
}

fn optional_string(expr: Option<&Expr>) -> TokenStream2 {
    expr.map_or_else(
        || quote!(::core::option::Option::None),
        |e| quote!(::core::option::Option::Some(::std::string::ToString::to_string(&(#e)))),
    )
}

fn optional_u32(expr: Option<&Expr>) -> TokenStream2 {
    expr.map_or_else(
        || quote!(::core::option::Option::None),
        |e| quote!(<u32 as ::core::convert::TryFrom<_>>::try_from(#e).ok()),
    )
}

fn optional_fetcher(fetcher: Option<&LitStr>) -> TokenStream2 {
    fetcher.map_or_else(
        || quote!(::core::option::Option::None),
        |f| quote!(::core::option::Option::Some(::std::string::String::from(#f))),
    )
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in &field.attrs {
        if attr.path().is_ident("form") {
            attr.parse_nested_meta(|meta| parse_form_meta(&meta, &mut options))?;
        } else if attr.path().is_ident("validate") && matches!(attr.meta, syn::Meta::List(_)) {
            attr.parse_nested_meta(|meta| parse_validate_meta(&meta, &mut options))?;
        }
    }

    Ok(options)
}

fn set_hint(meta: &ParseNestedMeta, options: &mut FieldOptions, hint: TokenStream2) -> syn::Result<()> {
    if options.hint.is_some() {
        return Err(meta.error("a field can carry only one element hint"));
    }
    options.hint = Some(hint);
    Ok(())
}

fn parse_choice_args(meta: &ParseNestedMeta) -> syn::Result<(Option<LitStr>, bool)> {
    let mut fetcher = None;
    let mut multiple = false;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("fetcher") {
                fetcher = Some(inner.value()?.parse::<LitStr>()?);
                Ok(())
            } else if inner.path.is_ident("multiple") {
                multiple = true;
                Ok(())
            } else {
                Err(inner.error("expected `fetcher` or `multiple`"))
            }
        })?;
    }
    Ok((fetcher, multiple))
}

fn parse_form_meta(meta: &ParseNestedMeta, options: &mut FieldOptions) -> syn::Result<()> {
    let path = &meta.path;

    if path.is_ident("skip") {
        options.skip = true;
    } else if path.is_ident("rename") {
        options.rename = Some(meta.value()?.parse::<LitStr>()?.value());
    } else if path.is_ident("auto_populated") {
        options.auto_populated = true;
    } else if path.is_ident("not_blank") {
        options.not_blank = true;
    } else if path.is_ident("not_null") {
        options.not_null = true;
    } else if path.is_ident("required") {
        options.required = true;
    } else if path.is_ident("positive") {
        options.positive = true;
    } else if path.is_ident("email") {
        options.email = true;
    } else if path.is_ident("min") {
        options.min = Some(meta.value()?.parse()?);
    } else if path.is_ident("max") {
        options.max = Some(meta.value()?.parse()?);
    } else if path.is_ident("pattern") {
        options.pattern = Some(meta.value()?.parse()?);
    } else if path.is_ident("placeholder") {
        options.placeholder = Some(meta.value()?.parse()?);
    } else if path.is_ident("length") {
        parse_length(meta, options)?;
    } else if path.is_ident("select") {
        let (fetcher, multiple) = parse_choice_args(meta)?;
        let fetcher = optional_fetcher(fetcher.as_ref());
        set_hint(
            meta,
            options,
            quote!(::acton_fieldset::forms::FieldHint::Select { fetcher: #fetcher, multiple: #multiple }),
        )?;
    } else if path.is_ident("radio") {
        let (fetcher, _) = parse_choice_args(meta)?;
        let fetcher = optional_fetcher(fetcher.as_ref());
        set_hint(
            meta,
            options,
            quote!(::acton_fieldset::forms::FieldHint::Radio { fetcher: #fetcher }),
        )?;
    } else if path.is_ident("checkbox") {
        let (fetcher, _) = parse_choice_args(meta)?;
        let fetcher = optional_fetcher(fetcher.as_ref());
        set_hint(
            meta,
            options,
            quote!(::acton_fieldset::forms::FieldHint::Checkbox { fetcher: #fetcher }),
        )?;
    } else if path.is_ident("textarea") {
        let mut rows = None;
        let mut cols = None;
        if meta.input.peek(syn::token::Paren) {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("rows") {
                    rows = Some(inner.value()?.parse::<Expr>()?);
                    Ok(())
                } else if inner.path.is_ident("cols") {
                    cols = Some(inner.value()?.parse::<Expr>()?);
                    Ok(())
                } else {
                    Err(inner.error("expected `rows` or `cols`"))
                }
            })?;
        }
        let rows = optional_u32(rows.as_ref());
        let cols = optional_u32(cols.as_ref());
        set_hint(
            meta,
            options,
            quote!(::acton_fieldset::forms::FieldHint::Textarea { rows: #rows, cols: #cols }),
        )?;
    } else if path.is_ident("file") {
        let mut accept = None;
        let mut multiple = false;
        if meta.input.peek(syn::token::Paren) {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("accept") {
                    accept = Some(inner.value()?.parse::<LitStr>()?);
                    Ok(())
                } else if inner.path.is_ident("multiple") {
                    multiple = true;
                    Ok(())
                } else {
                    Err(inner.error("expected `accept` or `multiple`"))
                }
            })?;
        }
        let accept = optional_fetcher(accept.as_ref());
        set_hint(
            meta,
            options,
            quote!(::acton_fieldset::forms::FieldHint::File { accept: #accept, multiple: #multiple }),
        )?;
    } else if path.is_ident("trix_editor") {
        set_hint(meta, options, quote!(::acton_fieldset::forms::FieldHint::TrixEditor))?;
    } else if path.is_ident("tel") {
        set_hint(meta, options, quote!(::acton_fieldset::forms::FieldHint::Tel))?;
    } else if path.is_ident("url") {
        set_hint(meta, options, quote!(::acton_fieldset::forms::FieldHint::Url))?;
    } else if path.is_ident("password") {
        set_hint(meta, options, quote!(::acton_fieldset::forms::FieldHint::Password))?;
    } else if path.is_ident("hidden") {
        set_hint(meta, options, quote!(::acton_fieldset::forms::FieldHint::Hidden))?;
    } else {
        return Err(meta.error("unsupported form attribute"));
    }

    Ok(())
}

fn parse_length(meta: &ParseNestedMeta, options: &mut FieldOptions) -> syn::Result<()> {
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("min") {
            options.min_length = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("max") {
            options.max_length = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("equal") {
            let value: Expr = inner.value()?.parse()?;
            options.min_length = Some(value.clone());
            options.max_length = Some(value);
        } else {
            skip_meta(&inner)?;
        }
        Ok(())
    })
}

fn parse_validate_meta(meta: &ParseNestedMeta, options: &mut FieldOptions) -> syn::Result<()> {
    let path = &meta.path;

    if path.is_ident("length") {
        parse_length(meta, options)?;
    } else if path.is_ident("range") {
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("min") {
                options.min = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("max") {
                options.max = Some(inner.value()?.parse()?);
            } else {
                skip_meta(&inner)?;
            }
            Ok(())
        })?;
    } else if path.is_ident("email") {
        options.email = true;
        skip_meta(meta)?;
    } else if path.is_ident("url") {
        options.url = true;
        skip_meta(meta)?;
    } else if path.is_ident("required") {
        options.required = true;
        skip_meta(meta)?;
    } else {
        skip_meta(meta)?;
    }

    Ok(())
}

/// Consume the arguments of a nested attribute this derive does not interpret
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}

fn expand_form_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let type_name = container_name(input)?;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "FormEnum can only be derived for enums"));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(ident, "FormEnum requires at least one variant"));
    }

    let mut variants = Vec::new();
    let mut values = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "FormEnum variants must not carry data",
            ));
        }
        let mut value = screaming_snake_case(&variant.ident.to_string());
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("form")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("value") {
                    value = meta.value()?.parse::<LitStr>()?.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported variant attribute, expected `value`"))
                }
            })?;
        }
        variants.push(&variant.ident);
        values.push(value);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::acton_fieldset::forms::FormEnum for #ident #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const CONSTANTS: &'static [&'static str] = &[#( #values ),*];

            fn constant_name(&self) -> &'static str {
                match self {
                    #( Self::#variants => #values, )*
                }
            }

            fn from_constant(constant: &str) -> ::core::option::Option<Self> {
                match constant {
                    #( #values => ::core::option::Option::Some(Self::#variants), )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::acton_fieldset::forms::FormValue for #ident #ty_generics #where_clause {
            fn field_type() -> ::acton_fieldset::forms::FieldType {
                ::acton_fieldset::forms::enum_field_type::<Self>()
            }

            fn to_field_value(&self) -> ::core::option::Option<::acton_fieldset::forms::FieldValue> {
                ::core::option::Option::Some(::acton_fieldset::forms::FieldValue::Enum(
                    ::acton_fieldset::forms::FormEnum::constant_name(self),
                ))
            }
        }
    })
}

/// `DoorsOpen` becomes `DOORS_OPEN`
fn screaming_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for ch in name.chars() {
        if ch.is_uppercase() && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push('_');
        }
        out.extend(ch.to_uppercase());
        previous = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(screaming_snake_case("Music"), "MUSIC");
        assert_eq!(screaming_snake_case("DoorsOpen"), "DOORS_OPEN");
        assert_eq!(screaming_snake_case("DRAFT"), "DRAFT");
        assert_eq!(screaming_snake_case("Level2Access"), "LEVEL2_ACCESS");
    }

    #[test]
    fn test_form_expansion_mentions_every_field() {
        let input: DeriveInput = syn::parse_quote! {
            struct EventForm {
                #[form(not_blank, length(min = 2, max = 50))]
                name: String,
                #[form(textarea(rows = 4))]
                notes: Option<String>,
                #[form(skip)]
                internal: Vec<u8>,
            }
        };
        let expanded = expand_form(&input).unwrap().to_string();
        assert!(expanded.contains("\"name\""));
        assert!(expanded.contains("\"notes\""));
        assert!(!expanded.contains("internal"));
        assert!(expanded.contains("Textarea"));
    }

    #[test]
    fn test_validate_attributes_are_read() {
        let input: DeriveInput = syn::parse_quote! {
            struct Signup {
                #[validate(email, length(max = 120, message = "too long"))]
                email: String,
                #[validate(range(min = 18, max = 130), custom(function = "check_age"))]
                age: u8,
            }
        };
        let expanded = expand_form(&input).unwrap().to_string();
        assert!(expanded.contains("120"));
        assert!(expanded.contains("18"));
        assert!(expanded.contains("constraints . email = true"));
    }

    #[test]
    fn test_two_hints_are_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Bad {
                #[form(password, hidden)]
                secret: String,
            }
        };
        assert!(expand_form(&input).is_err());
    }

    #[test]
    fn test_enum_with_data_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Bad {
                Unit,
                Tuple(u8),
            }
        };
        assert!(expand_form_enum(&input).is_err());
    }

    #[test]
    fn test_enum_value_override() {
        let input: DeriveInput = syn::parse_quote! {
            enum Status {
                Draft,
                #[form(value = "LIVE")]
                Published,
            }
        };
        let expanded = expand_form_enum(&input).unwrap().to_string();
        assert!(expanded.contains("\"DRAFT\""));
        assert!(expanded.contains("\"LIVE\""));
        assert!(!expanded.contains("\"PUBLISHED\""));
        assert!(expanded.contains("fn from_constant"));
    }

    #[test]
    fn test_field_types_are_looked_up_through_dispatch() {
        let input: DeriveInput = syn::parse_quote! {
            struct Upload {
                #[form(file(accept = "image/*"))]
                cover: Vec<u8>,
            }
        };
        let expanded = expand_form(&input).unwrap().to_string();
        assert!(expanded.contains("__dispatch :: Property"));
        assert!(expanded.contains(". descriptor (\"cover\")"));
        assert!(expanded.contains(". bind (& self . cover)"));
        assert!(!expanded.contains("FormValue :: to_field_value"));
    }
}
