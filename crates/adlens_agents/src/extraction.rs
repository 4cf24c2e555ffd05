//! Utilities for extracting structured data from model responses.
//!
//! Responses often wrap JSON in markdown fences or surround it with prose.

use adlens_error::{AdlensResult, AgentError, AgentErrorKind, JsonError};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced brackets or braces, whichever opens first
///
/// # Errors
///
/// Returns `AgentErrorKind::NoJson` if nothing JSON-shaped is found.
///
/// # Examples
///
/// ```
/// use adlens_agents::extract_json;
///
/// let response = "Here is the plan:\n\
///     \n\
///     ```json\n\
///     {\"tasks\": []}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"tasks\": []}");
/// ```
pub fn extract_json(response: &str) -> AdlensResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let order: &[(char, char)] = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => &[('[', ']'), ('{', '}')],
        (Some(_), None) => &[('[', ']')],
        _ => &[('{', '}'), ('[', ']')],
    };

    for &(open, close) in order {
        if let Some(json) = extract_balanced(response, open, close) {
            return Ok(json);
        }
    }

    tracing::warn!(
        response_length = response.len(),
        "No JSON found in model response"
    );

    Err(AgentError::new(AgentErrorKind::NoJson(response.len())).into())
}

/// Content of the first fenced code block.
///
/// A `json` fence wins over an untagged one. An unterminated fence yields
/// everything after it, since truncated responses are common.
fn extract_from_code_block(response: &str) -> Option<String> {
    if let Some(start) = response.find("```json") {
        let content_start = start + "```json".len();
        let rest = &response[content_start..];
        let content = rest.find("```").map_or(rest, |end| &rest[..end]);
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip an optional language tag on the fence line
    let skip_to = response[content_start..]
        .find('\n')
        .map_or(content_start, |n| content_start + n + 1);
    let rest = &response[skip_to..];
    let content = rest.find("```").map_or(rest, |end| &rest[..end]);
    let content = content.trim();

    // Prose in fences is not JSON; let the balanced scan look instead
    if content.starts_with('{') || content.starts_with('[') {
        Some(content.to_string())
    } else {
        None
    }
}

/// Content between the first `open` and its matching `close`, string-aware.
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
/// Returns a `JsonError` carrying a preview of the offending text.
///
/// # Examples
///
/// ```
/// use adlens_agents::parse_json;
/// use adlens_core::Task;
///
/// let task: Task = parse_json(r#"{"id": "t1", "agent": "data_agent"}"#).unwrap();
/// assert_eq!(task.id, "t1");
/// ```
pub fn parse_json<T>(json_str: &str) -> AdlensResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::warn!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

/// Text form of a JSON scalar. Arrays, objects and null have none.
pub(crate) fn scalar_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Rewrite `fields` of `object` as strings.
///
/// Scalars become their text; anything else is removed so the field takes
/// its default on deserialization.
pub(crate) fn coerce_text_fields(
    object: &mut serde_json::Map<String, serde_json::Value>,
    fields: &[&str],
) {
    for field in fields {
        let Some(value) = object.get(*field) else {
            continue;
        };
        match scalar_text(value) {
            Some(text) => {
                object.insert(field.to_string(), serde_json::Value::String(text));
            }
            None => {
                object.remove(*field);
            }
        }
    }
}

/// Read a JSON value as a list of strings.
///
/// A lone scalar becomes a one-item list; non-scalar array items are skipped.
pub(crate) fn text_list(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}
