//! Identifier synthesis from literal text.

/// Longest sanitized stem kept in a constant name.
pub const MAX_STEM_LEN: usize = 50;

/// Prefix of every synthesized string constant.
pub const CONSTANT_PREFIX: &str = "CONST_";

/// Constant name for a string value: uppercased, every character outside
/// `[A-Z0-9]` replaced by `_`, runs of `_` collapsed, cut to
/// [`MAX_STEM_LEN`] characters, and prefixed with [`CONSTANT_PREFIX`].
///
/// ```
/// assert_eq!(vulnfix_rules::constant_name("Starting job"), "CONST_STARTING_JOB");
/// ```
pub fn constant_name(value: &str) -> String {
    let mut stem = String::with_capacity(value.len());
    for c in value.chars().flat_map(char::to_uppercase) {
        let c = if c.is_ascii_uppercase() || c.is_ascii_digit() {
            c
        } else {
            '_'
        };
        if c == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(c);
    }
    stem.truncate(MAX_STEM_LEN);
    format!("{CONSTANT_PREFIX}{stem}")
}

/// Environment variable name for a Java identifier:
/// `dbPassword` becomes `DB_PASSWORD`, `apiKEYValue` becomes `API_KEY_VALUE`.
pub fn env_var_name(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Whether `name` was produced by [`constant_name`].
pub fn is_synthesized_constant(name: &str) -> bool {
    name.starts_with(CONSTANT_PREFIX)
}

/// `base` if free, else `base_2`, `base_3`, ... whichever is first free.
pub fn first_free(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests;
