/// PEM keys stored in a single-line environment variable have their line breaks written as a literal `\n`. This turns
/// them back into real newlines.
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Treats empty (or whitespace-only) values the same as missing ones.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
