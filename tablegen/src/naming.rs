//! Naming-convention helpers for code generation
//!
//! Generated files target several naming conventions at once (persistence
//! identifiers, TypeScript symbols, component names), so every logical name is
//! rendered in several case variants. All functions here are pure, operate on
//! ASCII identifiers with `_` as the word separator, and map empty input to an
//! empty string.

/// Convert `snake_case` to camelCase
///
/// Every `_` immediately followed by a lowercase ASCII letter is removed and the
/// letter is uppercased. Other characters, including `_` before digits, are kept.
///
/// # Examples
///
/// ```
/// # use tablegen::naming::to_camel;
/// assert_eq!(to_camel("user_profile"), "userProfile");
/// assert_eq!(to_camel("userProfile"), "userProfile");
/// assert_eq!(to_camel("item_2"), "item_2");
/// ```
#[must_use]
pub fn to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Convert camelCase or `PascalCase` to `snake_case`
///
/// Every uppercase letter except a leading one gets an `_` in front of it,
/// then the whole string is lowercased. This is the exact inverse of
/// [`to_camel`] on lowercase identifiers, except that a leading `_` before a
/// letter cannot be told apart from a `PascalCase` capital and is lost
/// (`"_id"` becomes `"Id"`, then `"id"`).
///
/// # Examples
///
/// ```
/// # use tablegen::naming::to_snake;
/// assert_eq!(to_snake("userProfile"), "user_profile");
/// assert_eq!(to_snake("UserProfile"), "user_profile");
/// assert_eq!(to_snake("item2Name"), "item2_name");
/// assert_eq!(to_snake("userXY"), "user_x_y");
/// ```
#[must_use]
pub fn to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);

    for (i, c) in input.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Convert `snake_case` or camelCase to `PascalCase`
///
/// # Examples
///
/// ```
/// # use tablegen::naming::to_pascal;
/// assert_eq!(to_pascal("user_profile"), "UserProfile");
/// assert_eq!(to_pascal("userProfile"), "UserProfile");
/// assert_eq!(to_pascal(""), "");
/// ```
#[must_use]
pub fn to_pascal(input: &str) -> String {
    capitalize(&to_camel(input))
}

/// Uppercase the first character, leaving the rest untouched
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Persistence-layer snake case
///
/// Every uppercase ASCII letter becomes `_` plus its lowercase form and a
/// single leading `_` is dropped, so `"_Id"` becomes `"_id"` where
/// [`to_snake`] gives `"__id"`. Runs of capitals are split letter by letter
/// (`"HTTPServer"` becomes `"h_t_t_p_server"`).
///
/// # Examples
///
/// ```
/// # use tablegen::naming::to_persistence_snake;
/// assert_eq!(to_persistence_snake("sysUser"), "sys_user");
/// assert_eq!(to_persistence_snake("SysUser"), "sys_user");
/// assert_eq!(to_persistence_snake("sys_user"), "sys_user");
/// ```
#[must_use]
pub fn to_persistence_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    match out.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// Display label for a column or table comment
///
/// Falls back to `fallback` when the comment is empty and cuts the text at the
/// first full-width opening parenthesis, which carries annotations such as
/// enum legends that do not belong in a UI label.
///
/// # Examples
///
/// ```
/// # use tablegen::naming::display_label;
/// assert_eq!(display_label("状态（0正常 1停用）", "status"), "状态");
/// assert_eq!(display_label("", "status"), "status");
/// ```
#[must_use]
pub fn display_label(comment: &str, fallback: &str) -> String {
    let text = if comment.is_empty() { fallback } else { comment };
    text.split_once('（')
        .map_or(text, |(head, _)| head)
        .to_string()
}
