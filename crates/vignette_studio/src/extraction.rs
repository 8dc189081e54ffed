//! Pulling JSON out of model responses.
//!
//! Models asked for bare JSON still wrap it in markdown fences or add a
//! sentence before it often enough that every response goes through here.

use serde::de::DeserializeOwned;
use vignette_error::{StoryError, StoryErrorKind, VignetteResult};

/// Extract the JSON object from a response that may contain markdown or
/// extra text.
///
/// Strategies, in order:
/// 1. A ```` ```json ```` fenced block
/// 2. Any fenced block
/// 3. The first balanced `{ ... }`
///
/// # Errors
///
/// Returns [`StoryErrorKind::MissingJson`] if no object is found.
///
/// # Examples
///
/// ```
/// use vignette_studio::extract_json;
///
/// let response = "Here is the overview:\n\
///     ```json\n\
///     {\"storyline\": \"A storm.\", \"emotional_tones\": [\"tense\"]}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> VignetteResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        if json.starts_with('{') {
            return Ok(json);
        }
        if let Some(inner) = extract_balanced(&json, '{', '}') {
            return Ok(inner);
        }
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in model response"
    );

    Err(StoryError::new(StoryErrorKind::MissingJson(format!(
        "response of {} bytes has no JSON object",
        response.len()
    )))
    .into())
}

/// Extract and deserialize the JSON object in `response`.
///
/// # Errors
///
/// Returns [`StoryErrorKind::MissingJson`] when there is no object and
/// [`StoryErrorKind::Parse`] when it does not match `T`.
pub fn parse_json<T: DeserializeOwned>(response: &str) -> VignetteResult<T> {
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        tracing::warn!(error = %e, "Model JSON did not match expected shape");
        StoryError::new(StoryErrorKind::Parse(e.to_string())).into()
    })
}

/// Content of the first fenced block, preferring one tagged `json`.
fn extract_from_code_block(response: &str) -> Option<String> {
    if let Some(start) = response.find("```json") {
        let content_start = start + "```json".len();
        let rest = &response[content_start..];
        let end = rest.find("```").unwrap_or(rest.len());
        return Some(rest[..end].trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip a language tag on the fence line.
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);
    let rest = &response[skip_to..];
    let end = rest.find("```").unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

/// First `open ... close` span with balanced nesting, ignoring delimiters
/// inside strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object() {
        let json = extract_json(r#"{"narration": "She waits."}"#).unwrap();
        assert_eq!(json, r#"{"narration": "She waits."}"#);
    }

    #[test]
    fn object_after_prose() {
        let json = extract_json(r#"Sure! {"a": {"b": 1}} Hope that helps."#).unwrap();
        assert_eq!(json, r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let json = extract_json(r#"{"narration": "a } brace \" and {"} trailing"#).unwrap();
        assert_eq!(json, r#"{"narration": "a } brace \" and {"}"#);
    }

    #[test]
    fn untagged_fence() {
        let response = "```\n{\"id\": 2}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"id\": 2}");
    }

    #[test]
    fn truncated_fence_still_yields_object() {
        let response = "```json\n{\"id\": 3}\n";
        assert_eq!(extract_json(response).unwrap(), "{\"id\": 3}");
    }

    #[test]
    fn no_json_is_an_error() {
        let err = extract_json("I'm sorry, I can't help with that.").unwrap_err();
        assert!(err.to_string().contains("No JSON found"));
    }

    #[test]
    fn shape_mismatch_is_a_parse_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Narration {
            #[allow(dead_code)]
            narration: String,
        }
        let err = parse_json::<Narration>(r#"{"story": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse model response"));
    }
}
