//! Placeholder scanning and variable extraction
//!
//! A placeholder is `{{`, a run of characters without `}`, then `}}`. The
//! run is trimmed to get the variable name, which is otherwise taken
//! verbatim: spaces, commas and slashes are all allowed so that authors can
//! write instructional slots such as `{{ Low, Moderate, or High }}`.
//!
//! Nesting is not understood. `{{ a {{ b }} }}` scans as a single
//! placeholder named `a {{ b` followed by literal ` }}`.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// `{{` + anything but `}` + `}}`
    static ref PLACEHOLDER_PATTERN: Regex = Regex::new(r"\{\{([^}]*)\}\}").unwrap();
}

/// One placeholder occurrence in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Trimmed variable name
    pub name: &'a str,
    /// Exact source text, braces included
    pub raw: &'a str,
    /// Byte offset of the opening `{{`
    pub start: usize,
    /// Byte offset just past the closing `}}`
    pub end: usize,
}

/// Find every placeholder occurrence, in text order.
///
/// Occurrences whose name is blank (`{{ }}`) are not placeholders and are
/// skipped; unterminated `{{` is ignored.
pub fn find_placeholders(text: &str) -> Vec<Placeholder<'_>> {
    PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let name = cap.get(1)?.as_str().trim();
            if name.is_empty() {
                return None;
            }
            Some(Placeholder {
                name,
                raw: whole.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Distinct variable names in order of first appearance
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    find_placeholders(text)
        .into_iter()
        .filter(|p| seen.insert(p.name))
        .map(|p| p.name.to_string())
        .collect()
}

/// Check if text contains at least one placeholder
pub fn has_variables(text: &str) -> bool {
    !find_placeholders(text).is_empty()
}

/// Number of placeholder occurrences, duplicates included
pub fn count_placeholders(text: &str) -> usize {
    find_placeholders(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_has_no_variables() {
        assert!(extract_variables("").is_empty());
        assert!(!has_variables(""));
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        assert_eq!(
            extract_variables("{{ a }} and {{ b }} and {{ a }}"),
            vec!["a", "b"]
        );
        assert_eq!(
            extract_variables("{{ zeta }} {{ alpha }} {{ mid }}"),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_names_keep_punctuation_and_spaces() {
        assert_eq!(
            extract_variables("Impact: {{ Low, Moderate, or High }}"),
            vec!["Low, Moderate, or High"]
        );
        assert_eq!(
            extract_variables("{{ date (MM/DD/YYYY) }}"),
            vec!["date (MM/DD/YYYY)"]
        );
    }

    #[test]
    fn test_internal_whitespace_is_flexible() {
        assert_eq!(
            extract_variables("{{name}} {{ name }} {{\tname\n}}"),
            vec!["name"]
        );
        assert_eq!(count_placeholders("{{name}} {{ name }} {{\tname\n}}"), 3);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(extract_variables("{{ Name }} {{ name }}"), vec!["Name", "name"]);
    }

    #[test]
    fn test_unterminated_placeholder_is_ignored() {
        assert!(extract_variables("Dear {{ recipient").is_empty());
        assert_eq!(extract_variables("{{ a } and {{ b }}"), vec!["b"]);
    }

    #[test]
    fn test_blank_placeholder_is_not_a_variable() {
        assert!(extract_variables("{{}} {{   }}").is_empty());
        assert_eq!(count_placeholders("{{ }} {{ x }}"), 1);
    }

    #[test]
    fn test_nested_braces_are_best_effort() {
        assert_eq!(extract_variables("{{ a {{ b }} }}"), vec!["a {{ b"]);
    }

    #[test]
    fn test_placeholder_spans() {
        let text = "Hi {{ who }}!";
        let found = find_placeholders(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "who");
        assert_eq!(found[0].raw, "{{ who }}");
        assert_eq!(&text[found[0].start..found[0].end], "{{ who }}");
    }

    #[test]
    fn test_multibyte_text_around_placeholders() {
        let text = "Système – {{ nom du système }} ✓";
        assert_eq!(extract_variables(text), vec!["nom du système"]);
    }
}
