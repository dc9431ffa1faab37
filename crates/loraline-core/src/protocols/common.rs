use regex::Captures;

/// Text of a named capture group. Every group referenced by a parser is
/// non-optional in its grammar, so an absent group is a pattern bug and
/// reads as empty rather than panicking.
pub(crate) fn named<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}
