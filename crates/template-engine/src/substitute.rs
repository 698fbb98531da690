//! Variable substitution and completion tracking

use crate::variables::{extract_variables, find_placeholders};
use oscal_types::VariableValues;
use serde::{Deserialize, Serialize};

/// Replace each placeholder with its value.
///
/// Placeholders without a non-blank value keep their original text,
/// whitespace included. The text is scanned once; inserted values are
/// copied verbatim and never re-scanned, so the order in which variables
/// are filled does not matter and a value containing `{{ x }}` is not
/// expanded again. Values are not escaped.
pub fn substitute(text: &str, values: &VariableValues) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for placeholder in find_placeholders(text) {
        out.push_str(&text[cursor..placeholder.start]);
        match values.filled(placeholder.name) {
            Some(value) => out.push_str(value),
            None => out.push_str(placeholder.raw),
        }
        cursor = placeholder.end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Variables of `text` that still lack a value, in extraction order
pub fn unfilled_variables(text: &str, values: &VariableValues) -> Vec<String> {
    extract_variables(text)
        .into_iter()
        .filter(|name| !values.is_filled(name))
        .collect()
}

/// How many distinct variables of a template have a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub filled: usize,
    pub total: usize,
}

impl Completion {
    /// Count filled names among `names`
    pub fn of<S: AsRef<str>>(names: &[S], values: &VariableValues) -> Self {
        let filled = names
            .iter()
            .filter(|name| values.is_filled(name.as_ref()))
            .count();
        Self {
            filled,
            total: names.len(),
        }
    }

    /// `100 * filled / total`; a template without variables is 100% complete
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        100.0 * self.filled as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.total
    }
}

/// Completion of `text` against `values`
pub fn completion(text: &str, values: &VariableValues) -> Completion {
    Completion::of(&extract_variables(text), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> VariableValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_fills_placeholder() {
        assert_eq!(
            substitute("Hello {{ name }}", &values(&[("name", "World")])),
            "Hello World"
        );
    }

    #[test]
    fn test_empty_value_keeps_placeholder() {
        assert_eq!(
            substitute("Hello {{ name }}", &values(&[("name", "")])),
            "Hello {{ name }}"
        );
        assert_eq!(
            substitute("Hello {{ name }}", &values(&[("name", "  \n ")])),
            "Hello {{ name }}"
        );
        assert_eq!(
            substitute("Hello {{ name }}", &VariableValues::new()),
            "Hello {{ name }}"
        );
    }

    #[test]
    fn test_unfilled_placeholder_keeps_original_spacing() {
        let text = "A {{name}} B {{   other\t}}";
        assert_eq!(substitute(text, &VariableValues::new()), text);
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let text = "{{ org }} certifies that {{org}} operates {{ system }}.";
        assert_eq!(
            substitute(text, &values(&[("org", "NASA"), ("system", "Pleiades")])),
            "NASA certifies that NASA operates Pleiades."
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let text = "{{ a }} / {{ b }}";
        let vals = values(&[("a", "{{ b }}"), ("b", "B")]);
        assert_eq!(substitute(text, &vals), "{{ b }} / B");
    }

    #[test]
    fn test_values_inserted_verbatim() {
        let text = "Note: {{ note }}";
        let vals = values(&[("note", " <b>raw</b> ")]);
        assert_eq!(substitute(text, &vals), "Note:  <b>raw</b> ");
    }

    #[test]
    fn test_partial_fill() {
        let text = "{{ a }}-{{ b }}";
        let vals = values(&[("a", "1")]);
        assert_eq!(substitute(text, &vals), "1-{{ b }}");
        assert_eq!(unfilled_variables(text, &vals), vec!["b"]);
    }

    #[test]
    fn test_lingering_keys_are_harmless() {
        let vals = values(&[("gone", "x"), ("kept", "y")]);
        assert_eq!(substitute("{{ kept }}", &vals), "y");
    }

    #[test]
    fn test_completion_percentages() {
        assert_eq!(completion("no variables here", &VariableValues::new()).percentage(), 100.0);

        let text = "{{ a }} {{ b }}";
        let half = completion(text, &values(&[("a", "x")]));
        assert_eq!(half, Completion { filled: 1, total: 2 });
        assert_eq!(half.percentage(), 50.0);
        assert!(!half.is_complete());

        let full = completion(text, &values(&[("a", "x"), ("b", "y")]));
        assert!(full.is_complete());
        assert_eq!(full.percentage(), 100.0);
    }

    #[test]
    fn test_duplicates_count_once_for_completion() {
        let text = "{{ a }} {{ a }} {{ b }}";
        assert_eq!(completion(text, &values(&[("a", "x")])).total, 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Template text built from plain words and identifier placeholders
    fn template_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                "[A-Za-z .,\n]{0,12}",
                "[a-e]".prop_map(|n| format!("{{{{ {} }}}}", n)),
                "[a-e]".prop_map(|n| format!("{{{{{}}}}}", n)),
            ],
            0..12,
        )
        .prop_map(|parts| parts.concat())
    }

    /// Values for names a..e, free of brace characters
    fn brace_free_values() -> impl Strategy<Value = VariableValues> {
        prop::collection::btree_map("[a-e]", "[A-Za-z0-9 ]{0,6}", 0..5)
            .prop_map(VariableValues::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn idempotent_once_fully_filled(text in template_text(), fill in "[A-Za-z0-9]{1,6}") {
            let vals: VariableValues = extract_variables(&text)
                .into_iter()
                .map(|n| (n, fill.clone()))
                .collect();
            let once = substitute(&text, &vals);
            let twice = substitute(&once, &vals);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn filled_placeholders_disappear(text in template_text(), vals in brace_free_values()) {
            let before: HashSet<String> = extract_variables(&text).into_iter().collect();
            let after = extract_variables(&substitute(&text, &vals));
            for name in after {
                prop_assert!(before.contains(&name));
                prop_assert!(!vals.is_filled(&name));
            }
        }

        #[test]
        fn unfilled_placeholders_remain(text in template_text(), vals in brace_free_values()) {
            let after: HashSet<String> =
                extract_variables(&substitute(&text, &vals)).into_iter().collect();
            for name in unfilled_variables(&text, &vals) {
                prop_assert!(after.contains(&name));
            }
        }

        #[test]
        fn empty_values_change_nothing(text in template_text()) {
            prop_assert_eq!(substitute(&text, &VariableValues::new()), text);
        }
    }
}
