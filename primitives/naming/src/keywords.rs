//! Go reserved words and identifier validity.

/// The 25 Go keywords.
pub const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Returns true if `name` is a Go keyword.
pub fn is_go_keyword(name: &str) -> bool { GO_KEYWORDS.contains(&name) }

/// Returns true if `name` is a valid (unqualified) Go identifier.
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_') && !is_go_keyword(name)
}

/// Map a keyword used as a variable name to an alternate spelling.
///
/// # Examples
/// ```
/// use naming::go_safe_identifier;
/// assert_eq!(go_safe_identifier("type"), "typ");
/// assert_eq!(go_safe_identifier("select"), "select_");
/// assert_eq!(go_safe_identifier("limit"), "limit");
/// ```
pub fn go_safe_identifier(name: &str) -> String {
    match name {
        "type" => "typ".to_string(),
        "func" => "fn".to_string(),
        "interface" => "iface".to_string(),
        "package" => "pkg".to_string(),
        "range" => "rng".to_string(),
        other if is_go_keyword(other) => format!("{other}_"),
        other => other.to_string(),
    }
}
