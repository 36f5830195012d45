//! Placeholder detection for `{{variable}}` templates

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// `{{` followed by one or more non-`}` characters followed by `}}`
    pub static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([^}]+)\}\}").unwrap();
}

/// Extract every placeholder name in order of appearance, duplicates included
pub fn extract_variables(content: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract distinct placeholder names, keeping the order they first appear in
pub fn unique_variables(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_variables(content)
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Check if a string contains at least one well-formed placeholder
pub fn has_placeholders(content: &str) -> bool {
    PLACEHOLDER.is_match(content)
}

/// Label shown next to a variable's input in the contract editor
///
/// `client_name` becomes `client name`.
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Input hint for a variable, e.g. `Enter client name`
pub fn input_prompt(name: &str) -> String {
    format!("Enter {}", humanize(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_empty() {
        assert!(extract_variables("").is_empty());
        assert!(extract_variables("no placeholders here").is_empty());
    }

    #[test]
    fn test_extract_in_order() {
        assert_eq!(
            extract_variables("Hello {{name}}, you are {{age}}"),
            vec!["name", "age"]
        );
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        assert_eq!(
            extract_variables("{{a}} {{b}} {{a}}"),
            vec!["a", "b", "a"]
        );
    }

    #[test]
    fn test_unique_keeps_first_seen_order() {
        assert_eq!(
            unique_variables("{{b}} {{a}} {{b}} {{c}} {{a}}"),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_malformed_placeholders_ignored() {
        assert!(extract_variables("{{}}").is_empty());
        assert!(extract_variables("{{open").is_empty());
        assert!(extract_variables("{single}").is_empty());
        assert!(extract_variables("close}}").is_empty());
    }

    #[test]
    fn test_token_spans_whitespace_and_newlines() {
        assert_eq!(extract_variables("{{ spaced name }}"), vec![" spaced name "]);
        assert_eq!(extract_variables("{{two\nlines}}"), vec!["two\nlines"]);
    }

    #[test]
    fn test_placeholders_are_case_sensitive() {
        assert_eq!(unique_variables("{{Name}} {{name}}"), vec!["Name", "name"]);
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("Dear {{client_name}}"));
        assert!(!has_placeholders("Dear client"));
        assert!(!has_placeholders("{{}}"));
    }

    #[test]
    fn test_humanize_and_prompt() {
        assert_eq!(humanize("late_fee_percentage"), "late fee percentage");
        assert_eq!(input_prompt("client_name"), "Enter client name");
        assert_eq!(humanize("party_1"), "party 1");
    }
}
