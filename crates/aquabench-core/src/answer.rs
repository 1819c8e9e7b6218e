//! Raw answer normalization.
//!
//! Models hand back answers in several shapes: a single letter, a
//! comma/semicolon/whitespace-delimited string, a bare run of letters, or
//! a list of any of those. Everything funnels through [`normalize_answer`]
//! into one canonical form (an ordered, deduplicated set of uppercase
//! option letters) before any comparison logic runs.

use serde_json::Value;

use crate::error::EvalError;

/// Normalize a raw prediction value into ordered uppercase option letters.
///
/// `Null` and empty strings/arrays yield the empty set. Mappings, numbers,
/// and booleans are not valid answer values and fail with
/// [`EvalError::Validation`].
pub fn normalize_answer(raw: &Value) -> Result<Vec<char>, EvalError> {
    let mut letters = Vec::new();
    collect(raw, &mut letters)?;
    Ok(letters)
}

/// Normalize an answer string (the tabular-cell fast path). Infallible:
/// strings always normalize, possibly to the empty set.
pub fn normalize_text(text: &str) -> Vec<char> {
    let mut letters = Vec::new();
    collect_text(text, &mut letters);
    letters
}

/// Join option letters for display ("A,B").
pub fn join_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn collect(raw: &Value, out: &mut Vec<char>) -> Result<(), EvalError> {
    match raw {
        Value::Null => Ok(()),
        Value::String(text) => {
            collect_text(text, out);
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                collect(item, out)?;
            }
            Ok(())
        }
        Value::Object(_) => Err(EvalError::validation(
            "a mapping is not a valid answer value",
        )),
        other => Err(EvalError::validation(format!(
            "unsupported answer value: {other}"
        ))),
    }
}

fn collect_text(text: &str, out: &mut Vec<char>) {
    let is_delimiter = |c: char| c == ',' || c == ';' || c.is_whitespace();

    if text.chars().any(is_delimiter) {
        // Delimiter-based split takes precedence over character iteration.
        for token in text.split(is_delimiter) {
            push_letters(token, out);
        }
    } else {
        push_letters(text, out);
    }
}

fn push_letters(token: &str, out: &mut Vec<char>) {
    let token = token.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'');
    for ch in token.chars() {
        if ch.is_ascii_alphabetic() {
            let letter = ch.to_ascii_uppercase();
            if !out.contains(&letter) {
                out.push(letter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_yield_empty_set() {
        assert!(normalize_answer(&Value::Null).unwrap().is_empty());
        assert!(normalize_answer(&json!("")).unwrap().is_empty());
        assert!(normalize_answer(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn delimiter_choice_does_not_matter() {
        let expected = vec!['A', 'B'];
        assert_eq!(normalize_answer(&json!("A,B")).unwrap(), expected);
        assert_eq!(normalize_answer(&json!("A B")).unwrap(), expected);
        assert_eq!(normalize_answer(&json!("A;B")).unwrap(), expected);
        assert_eq!(normalize_answer(&json!("AB")).unwrap(), expected);
        assert_eq!(normalize_answer(&json!("a; b")).unwrap(), expected);
    }

    #[test]
    fn quotes_and_whitespace_are_stripped() {
        assert_eq!(normalize_answer(&json!("\"C\"")).unwrap(), vec!['C']);
        assert_eq!(normalize_answer(&json!("  d  ")).unwrap(), vec!['D']);
    }

    #[test]
    fn sequences_flatten_in_order() {
        assert_eq!(normalize_answer(&json!(["B", "A"])).unwrap(), vec!['B', 'A']);
        assert_eq!(
            normalize_answer(&json!(["A", ["C", "B"]])).unwrap(),
            vec!['A', 'C', 'B']
        );
    }

    #[test]
    fn duplicates_keep_first_seen_order() {
        assert_eq!(normalize_answer(&json!("B,A,B,A")).unwrap(), vec!['B', 'A']);
    }

    #[test]
    fn idempotent_on_normalized_input() {
        let once = normalize_answer(&json!(["A", "B"])).unwrap();
        let again = normalize_answer(&json!(once
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()))
        .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn mappings_and_scalars_are_rejected() {
        assert!(matches!(
            normalize_answer(&json!({"answer": "A"})),
            Err(EvalError::Validation(_))
        ));
        assert!(matches!(
            normalize_answer(&json!(3)),
            Err(EvalError::Validation(_))
        ));
        assert!(matches!(
            normalize_answer(&json!(true)),
            Err(EvalError::Validation(_))
        ));
    }

    #[test]
    fn join_letters_uses_commas() {
        assert_eq!(join_letters(&['A', 'C']), "A,C");
        assert_eq!(join_letters(&[]), "");
    }
}
