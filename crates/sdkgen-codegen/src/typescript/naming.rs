//! TypeScript identifier rules.

use crate::backend::NameKind;
use sdkgen_core::inflect::{to_camel_case, to_pascal_case};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Words that cannot be used as TypeScript binding names.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Applies the TypeScript casing for `kind` to a raw snake or kebab name.
///
/// Types and enum members are PascalCase, methods and bindings camelCase.
/// Property keys keep their wire name so declared shapes match payloads,
/// and are quoted when they are not valid identifiers.
#[must_use]
pub fn convert(raw: &str, kind: NameKind) -> String {
    match kind {
        NameKind::Type | NameKind::EnumMember => sanitize(&to_pascal_case(raw)),
        NameKind::RequestClass => sanitize(&format!("{}InputParam", to_pascal_case(raw))),
        NameKind::ResponseClass => sanitize(&format!("{}Response", to_pascal_case(raw))),
        NameKind::Action => to_camel_case(raw),
        NameKind::Parameter => sanitize(&to_camel_case(raw)),
        NameKind::Attribute => quote_if_needed(raw),
    }
}

/// Makes `name` usable as a binding: prefixes `_` for reserved words and
/// leading digits, and maps the empty name to `_empty`.
#[must_use]
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return "_empty".to_string();
    }
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if TS_RESERVED_WORDS.contains(cleaned.as_str())
        || cleaned.starts_with(|c: char| c.is_ascii_digit())
    {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

/// `true` if `name` cannot be written as a bare property key.
#[must_use]
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quotes a property key when it is not a valid identifier.
#[must_use]
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_string(name))
    } else {
        name.to_string()
    }
}

/// Escapes a value for a single-quoted string literal.
#[must_use]
pub fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Single-quoted string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    format!("'{}'", escape_string(value))
}
