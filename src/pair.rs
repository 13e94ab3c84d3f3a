//! Normalization rules for pair keys and values

/// Separator between the user and name halves of a storage key.
pub const KEY_SEPARATOR: char = ':';

/// Derive the storage key for a pair.
///
/// Both identifiers are lowercased independently, so `("Alice", "Notes")` and
/// `("alice", "notes")` address the same pair. The separator is not escaped:
/// `("a:b", "c")` and `("a", "b:c")` share the key `a:b:c`.
pub fn derive_key(user: &str, name: &str) -> Vec<u8> {
    let user = fold_case(user);
    let name = fold_case(name);
    let mut key = String::with_capacity(user.len() + name.len() + 1);
    key.push_str(&user);
    key.push(KEY_SEPARATOR);
    key.push_str(&name);
    key.into_bytes()
}

/// Lowercase one character at a time, without context-sensitive mappings
/// such as the word-final sigma.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Derive the stored form of a value: trimmed, with a single trailing newline.
pub fn derive_value(raw: &str) -> Vec<u8> {
    let mut value = raw.trim().to_string();
    value.push('\n');
    value.into_bytes()
}

/// Whether a name is reserved, i.e. wrapped in double underscores.
pub fn is_private(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}
