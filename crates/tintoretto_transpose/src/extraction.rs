//! Utilities for extracting structured data from provider responses.
//!
//! Providers often wrap JSON in markdown code fences or mix it with
//! explanatory text even when the prompt demands bare JSON. This module
//! salvages the JSON payload from the common response shapes.

use tintoretto_error::{JsonError, TintorettoResult, TransposeError, TransposeErrorKind};
use tintoretto_interface::WorldBible;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Tries multiple extraction strategies:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns an error if no JSON value is found in the response.
///
/// # Examples
///
/// ```
/// use tintoretto_transpose::extract_json;
///
/// let response = "Here's the mapping you requested:\n\
///     \n\
///     ```json\n\
///     {\"setting\": \"2030\"}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("2030"));
/// ```
pub fn extract_json(response: &str) -> TintorettoResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    // Prefer whichever top-level structure appears first.
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
        }
        (Some(_), None) => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
        _ => {
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in provider response"
    );

    Err(TransposeError::new(TransposeErrorKind::NoJsonFound(format!(
        "response length {}. Hint: ensure the prompt demands JSON-only output.",
        response.len()
    )))
    .into())
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence, likely a truncated response. Take everything
        // from the opening fence to the end.
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to the next newline in case there's a language specifier.
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, handling nesting and string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
pub fn parse_json<T>(json_str: &str) -> TintorettoResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("{} (JSON: {}...)", e, preview)).into()
    })
}

/// Salvage a world bible from raw provider output.
///
/// # Errors
///
/// Returns an error when no JSON is present or the JSON does not match
/// the bible schema. Callers that want fallback behavior handle the error
/// themselves; this function only reports it.
///
/// # Examples
///
/// ```
/// use tintoretto_transpose::parse_world_bible;
///
/// assert!(parse_world_bible("no structure here at all").is_err());
/// ```
pub fn parse_world_bible(raw: &str) -> TintorettoResult<WorldBible> {
    let json = extract_json(raw)?;
    parse_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_from_code_block() {
        let response = r#"
Here's the JSON you requested:

```json
{
  "setting": "Manhattan",
  "year": 2030
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"year\": 2030"));
    }

    #[test]
    fn extract_json_from_plain_code_block() {
        let response = "```\n{\"setting\": \"Manhattan\"}\n```";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("Manhattan"));
    }

    #[test]
    fn extract_json_balanced_braces() {
        let response = r#"
Sure! Here it is: {"setting": {"transformed": "a trading floor"}}
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn extract_json_array() {
        let response = r#"
Here are the items:
[
  {"act": 1},
  {"act": 2}
]
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn extract_json_with_string_escapes() {
        let response = r#"{"text": "She said \"run it\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn extract_json_truncated_fence() {
        let response = "```json\n{\"setting\": \"Manhattan\"}";
        let json = extract_json(response).unwrap();
        assert!(json.contains("Manhattan"));
    }

    #[test]
    fn no_json_found() {
        let response = "This is just plain text with no structure";
        assert!(extract_json(response).is_err());
    }

    #[test]
    fn parse_json_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct Probe {
            act: u32,
            name: String,
        }

        let json = r#"{"act": 1, "name": "opening"}"#;
        let probe: Probe = parse_json(json).unwrap();
        assert_eq!(probe.act, 1);
        assert_eq!(probe.name, "opening");
    }

    #[test]
    fn parse_json_reports_malformed_input() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct Probe {
            #[allow(dead_code)]
            act: u32,
        }

        let result: TintorettoResult<Probe> = parse_json("{\"act\": ");
        assert!(result.is_err());
    }
}
