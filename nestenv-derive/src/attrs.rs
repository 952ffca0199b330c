//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates decode attributes from the struct and
//! its fields during macro expansion.

use syn::{Attribute, Field, LitStr, Path};

/// Case policies accepted by `#[env(case = "...")]`
const CASES: &[&str] = &["none", "upper", "lower"];

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Prefix of every variable of the struct
    pub prefix: Option<String>,

    /// Separator between name segments
    pub separator: Option<String>,

    /// Case policy, one of [`CASES`]
    pub case: Option<String>,
}

impl ContainerAttrs {
    /// Extract and validate `#[env(...)]` attributes from the struct.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.prefix = Some(value.value());
                    return Ok(());
                }

                // separator = "..."
                if meta.path.is_ident("separator") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(value, "separator must not be empty"));
                    }
                    parsed.separator = Some(value.value());
                    return Ok(());
                }

                // case = "none" | "upper" | "lower"
                if meta.path.is_ident("case") {
                    let value: LitStr = meta.value()?.parse()?;
                    let case = value.value().to_ascii_lowercase();
                    if !CASES.contains(&case.as_str()) {
                        return Err(syn::Error::new_spanned(
                            value,
                            "case must be one of \"none\", \"upper\" or \"lower\"",
                        ));
                    }
                    parsed.case = Some(case);
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed field-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Name segment override.
    ///
    /// If `None`, the field identifier is used as written.
    pub name: Option<String>,

    /// Leave the field out of decoding.
    pub skip: bool,

    /// Custom deserializer function (e.g., `serde_json::from_str`).
    ///
    /// When specified, the field is read from a single variable and parsed by
    /// this function instead of being decoded by its type's shape.
    pub deserializer: Option<Path>,
}

impl FieldAttrs {
    /// Extract and validate `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(value, "name must not be empty"));
                    }
                    attrs.name = Some(value.value());
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(value.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        if attrs.skip && (attrs.name.is_some() || attrs.deserializer.is_some()) {
            return Err(syn::Error::new_spanned(
                field,
                "skipped fields cannot have name or deserializer attributes",
            ));
        }

        Ok(attrs)
    }
}
