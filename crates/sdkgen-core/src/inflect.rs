//! Name inflection helpers shared by the IR and the backends.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::inflect::{singularize, to_pascal_case};
//!
//! assert_eq!(to_pascal_case(&singularize("line_items")), "LineItem");
//! ```

/// Singularizes the last `_`-separated word of a snake-case name.
///
/// Covers the plural forms resource and attribute names actually use;
/// names that already look singular are returned unchanged.
///
/// # Examples
///
/// ```
/// use sdkgen_core::inflect::singularize;
///
/// assert_eq!(singularize("line_items"), "line_item");
/// assert_eq!(singularize("entities"), "entity");
/// assert_eq!(singularize("addresses"), "address");
/// assert_eq!(singularize("taxes"), "tax");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("customer"), "customer");
/// ```
#[must_use]
pub fn singularize(name: &str) -> String {
    let (head, word) = match name.rfind('_') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };
    format!("{head}{}", singularize_word(word))
}

fn singularize_word(word: &str) -> String {
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for (suffix, keep) in [("sses", 2), ("uses", 2), ("xes", 1), ("ches", 2), ("shes", 2)] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..keep]);
        }
    }
    if word.len() > 1
        && word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Converts camelCase, PascalCase, kebab or spaced names to `snake_case`.
///
/// # Examples
///
/// ```
/// use sdkgen_core::inflect::to_snake_case;
///
/// assert_eq!(to_snake_case("LineItem"), "line_item");
/// assert_eq!(to_snake_case("auto-collection"), "auto_collection");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else if matches!(ch, '-' | ' ' | '.') {
            if !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// Converts a snake or kebab name to camelCase.
///
/// # Examples
///
/// ```
/// use sdkgen_core::inflect::to_camel_case;
///
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// assert_eq!(to_camel_case("in-progress"), "inProgress");
/// assert_eq!(to_camel_case("hello"), "hello");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = false;

    for ch in name.chars() {
        if matches!(ch, '_' | '-' | ' ' | '.') {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Converts a snake or kebab name to PascalCase.
///
/// # Examples
///
/// ```
/// use sdkgen_core::inflect::to_pascal_case;
///
/// assert_eq!(to_pascal_case("auto_collection"), "AutoCollection");
/// assert_eq!(to_pascal_case("no_card"), "NoCard");
/// assert_eq!(to_pascal_case("on"), "On");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    capitalize_first(&to_camel_case(name))
}

/// Upper-cases the first character.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize_last_word_only() {
        assert_eq!(singularize("subscriptions"), "subscription");
        assert_eq!(singularize("invoices"), "invoice");
        assert_eq!(singularize("payment_sources"), "payment_source");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("batches"), "batch");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_snake_case("CardStatus"), "card_status");
        assert_eq!(to_camel_case("_leading"), "leading");
        assert_eq!(to_pascal_case("line_item"), "LineItem");
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(capitalize_first("x"), "X");
    }
}
