//! Variable substitution over template text

use regex::Captures;
use std::collections::HashMap;

use crate::errors::{Result, TemplateError};
use crate::variables::{unique_variables, PLACEHOLDER};

/// Values supplied for template variables at render time
pub type Bindings = HashMap<String, String>;

/// Substitute bound variables into `content`.
///
/// Every occurrence of `{{name}}` is replaced with `bindings[name]`; names
/// without a binding stay as the literal placeholder. Substitution is a
/// single pass over the original text, so a bound value that itself looks
/// like `{{other}}` is emitted verbatim rather than expanded.
pub fn render(content: &str, bindings: &Bindings) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct variables in `content` that have no binding, in first-seen order
pub fn unbound_variables(content: &str, bindings: &Bindings) -> Vec<String> {
    unique_variables(content)
        .into_iter()
        .filter(|name| !bindings.contains_key(name))
        .collect()
}

/// True when every variable in `content` has a binding
pub fn is_fully_bound(content: &str, bindings: &Bindings) -> bool {
    unbound_variables(content, bindings).is_empty()
}

/// Build bindings from `name=value` pairs
pub fn bindings_from_pairs<I, K, V>(pairs: I) -> Bindings
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Parse bindings from a flat JSON object.
///
/// Strings are taken as-is; numbers and booleans are stringified. Nested
/// values and `null` are rejected.
pub fn bindings_from_json(json: &str) -> Result<Bindings> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut bindings = Bindings::with_capacity(map.len());
    for (name, value) in map {
        let value = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            other => {
                return Err(TemplateError::InvalidBindings(format!(
                    "value for '{}' must be a string, number or boolean, got {}",
                    name, other
                )))
            }
        };
        bindings.insert(name, value);
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::extract_variables;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unbound_passthrough() {
        assert_eq!(render("Hi {{n}}", &Bindings::new()), "Hi {{n}}");
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let bindings = bindings_from_pairs([("a", "x")]);
        assert_eq!(render("{{a}}-{{a}}", &bindings), "x-x");
    }

    #[test]
    fn test_partial_bindings() {
        let bindings = bindings_from_pairs([("client_company", "Acme Corporation")]);
        let out = render(
            "between {{client_company}} and {{service_provider}}",
            &bindings,
        );
        assert_eq!(out, "between Acme Corporation and {{service_provider}}");
    }

    #[test]
    fn test_empty_value_is_a_binding() {
        let bindings = bindings_from_pairs([("notes", "")]);
        assert_eq!(render("Notes: {{notes}}.", &bindings), "Notes: .");
    }

    #[test]
    fn test_value_with_placeholder_not_resubstituted() {
        let bindings = bindings_from_pairs([("a", "{{b}}"), ("b", "boom")]);
        assert_eq!(render("{{a}} {{b}}", &bindings), "{{b}} boom");
    }

    #[test]
    fn test_value_with_regex_metacharacters() {
        let bindings = bindings_from_pairs([("price", "$1,000 (net) \\ $0")]);
        assert_eq!(render("Total: {{price}}", &bindings), "Total: $1,000 (net) \\ $0");
    }

    #[test]
    fn test_fully_bound_render_leaves_no_placeholders() {
        let content = "Dear {{name}}, your {{kind}} review is due {{date}}. Thanks, {{name}}";
        let bindings = bindings_from_pairs([
            ("name", "Sarah"),
            ("kind", "KYC"),
            ("date", "2024-02-01"),
        ]);
        let out = render(content, &bindings);
        assert!(extract_variables(&out).is_empty());
        assert_eq!(render(&out, &bindings), out);
    }

    #[test]
    fn test_unbound_variables() {
        let bindings = bindings_from_pairs([("b", "1")]);
        assert_eq!(
            unbound_variables("{{a}} {{b}} {{c}} {{a}}", &bindings),
            vec!["a", "c"]
        );
        assert!(!is_fully_bound("{{a}} {{b}}", &bindings));
        assert!(is_fully_bound("{{b}}", &bindings));
        assert!(is_fully_bound("plain text", &Bindings::new()));
    }

    #[test]
    fn test_bindings_from_json() {
        let bindings =
            bindings_from_json(r#"{"client_name": "Acme", "duration_years": 2, "signed": true}"#)
                .unwrap();
        assert_eq!(bindings["client_name"], "Acme");
        assert_eq!(bindings["duration_years"], "2");
        assert_eq!(bindings["signed"], "true");
    }

    #[test]
    fn test_bindings_from_json_rejects_nested() {
        let err = bindings_from_json(r#"{"items": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidBindings(_)));

        let err = bindings_from_json("[]").unwrap_err();
        assert!(matches!(err, TemplateError::Json(_)));
    }
}
