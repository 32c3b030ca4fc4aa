//! Artifact identifier rules

use regex::Regex;
use std::sync::LazyLock;

static KEBAB_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

static FRONTMATTER_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").unwrap());

/// Whether `key` can be written as a plain YAML mapping key.
pub fn is_frontmatter_key(key: &str) -> bool {
    FRONTMATTER_KEY.is_match(key)
}

/// Whether `id` is a lowercase, hyphen-separated token.
///
/// Leading, trailing and doubled hyphens are rejected.
pub fn is_kebab_case(id: &str) -> bool {
    KEBAB_CASE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("reviewer", true)]
    #[case("typescript-rules", true)]
    #[case("v2-api", true)]
    #[case("Reviewer", false)]
    #[case("snake_case", false)]
    #[case("-leading", false)]
    #[case("trailing-", false)]
    #[case("double--hyphen", false)]
    #[case("", false)]
    #[case("has space", false)]
    fn kebab_case(#[case] id: &str, #[case] expected: bool) {
        assert_eq!(is_kebab_case(id), expected, "{id}");
    }

    #[rstest]
    #[case("applyTo", true)]
    #[case("x-owner", true)]
    #[case("tools.allowed", true)]
    #[case("a: b", false)]
    #[case("# note", false)]
    #[case("line\nbreak", false)]
    #[case("", false)]
    fn frontmatter_key(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_frontmatter_key(key), expected, "{key:?}");
    }
}
