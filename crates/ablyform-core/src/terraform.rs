//! Terraform helpers over `hcl-rs`.
//!
//! Emitters build [`hcl::Block`]s with the constructors here and
//! [`render`] formats them. Object keys come in two flavours: schema
//! attribute names, written bare, and keys taken from account data such
//! as capability channel patterns, which are always quoted so that words
//! like `for` or `if` stay literal.
//!
//! Rendering is deterministic: attributes keep insertion order, nesting
//! is indented by two spaces, arrays stay on one line.

use hcl::expr::{Traversal, Variable};
use hcl::format::{Format, Formatter};
use hcl::{Attribute, Block, BlockBuilder, Expression, Identifier, ObjectKey};

use crate::error::CoreError;

// ── Expressions ─────────────────────────────────────────────────────

/// Object constructor keyed by schema attribute names.
pub fn object<'a>(entries: impl IntoIterator<Item = (&'a str, Expression)>) -> Expression {
    Expression::Object(
        entries
            .into_iter()
            .map(|(key, value)| (ObjectKey::Identifier(Identifier::unchecked(key)), value))
            .collect(),
    )
}

/// Object constructor keyed by account data. Keys are always quoted.
pub fn data_object<K: Into<String>>(
    entries: impl IntoIterator<Item = (K, Expression)>,
) -> Expression {
    Expression::Object(
        entries
            .into_iter()
            .map(|(key, value)| (ObjectKey::Expression(Expression::String(key.into())), value))
            .collect(),
    )
}

pub fn string_list<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Expression {
    Expression::Array(
        items
            .into_iter()
            .map(|s| Expression::String(s.as_ref().to_owned()))
            .collect(),
    )
}

/// `Some(value)` as a string, `None` as `""`.
pub fn string_or_empty(value: Option<&str>) -> Expression {
    Expression::String(value.unwrap_or_default().to_owned())
}

/// `Some(n)` as a number, `None` as `null`.
pub fn number_or_null(value: Option<u64>) -> Expression {
    value.map_or(Expression::Null, Expression::from)
}

/// `<resource_type>.<name>.id`.
///
/// `name` is used as-is so the traversal always matches the label the
/// referenced block was emitted with.
pub fn id_reference(resource_type: &str, name: &str) -> Expression {
    Traversal::builder(Variable::unchecked(resource_type))
        .attr(Identifier::unchecked(name))
        .attr(Identifier::unchecked("id"))
        .build()
        .into()
}

// ── Blocks ──────────────────────────────────────────────────────────

/// A `resource "<resource_type>" "<name>"` block builder.
pub fn resource(resource_type: &str, name: &str) -> BlockBuilder {
    Block::builder("resource")
        .add_label(resource_type)
        .add_label(name)
}

/// `<type>.<name>` for two-label blocks such as resources.
pub fn address(block: &Block) -> Option<String> {
    match block.labels() {
        [resource_type, name] => Some(format!("{}.{}", resource_type.as_str(), name.as_str())),
        _ => None,
    }
}

/// Look up a top-level attribute of `block`.
pub fn attribute<'a>(block: &'a Block, key: &str) -> Option<&'a Expression> {
    block
        .body()
        .attributes()
        .find(|attr| attr.key() == key)
        .map(Attribute::expr)
}

// ── Rendering ───────────────────────────────────────────────────────

/// Format a block, body or expression as HCL text.
pub fn render<T: Format>(value: &T) -> Result<String, CoreError> {
    let mut fmt = Formatter::builder().compact_arrays(true).build_vec();
    Ok(value.format_string(&mut fmt)?)
}
