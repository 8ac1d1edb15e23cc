use serde::de::DeserializeOwned;

use super::GatewayError;

/// Greedy span from the first `{` to the last `}` in `text`.
///
/// Models tend to wrap the object in commentary or code fences; the span
/// strips that off. Without a usable span the raw text is returned and left
/// for the parser to reject.
pub fn extract_json(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Extracts and deserializes the JSON object embedded in a model response.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    let json = extract_json(text);
    serde_json::from_str(json).map_err(|err| {
        tracing::debug!(error = %err, len = text.len(), "AI response did not decode");
        if err.is_syntax() || err.is_eof() {
            GatewayError::MalformedResponse("Failed to parse AI response as JSON".to_string())
        } else {
            GatewayError::MalformedResponse(format!("AI response has an unexpected shape: {err}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        feedback: String,
    }

    #[test]
    fn test_extracts_from_code_fence_and_commentary() {
        let text = "Here you go:\n```json\n{\"feedback\": \"Nice work overall\"}\n```\nEnjoy!";
        assert_eq!(extract_json(text), "{\"feedback\": \"Nice work overall\"}");
        let probe: Probe = decode(text).unwrap();
        assert_eq!(probe.feedback, "Nice work overall");
    }

    #[test]
    fn test_span_is_greedy_across_nested_objects() {
        let text = "a {\"x\": {\"y\": 1}} b } c";
        assert_eq!(extract_json(text), "{\"x\": {\"y\": 1}} b }");
    }

    #[test]
    fn test_without_braces_returns_raw_text() {
        assert_eq!(extract_json("no json here"), "no json here");
        assert_eq!(extract_json("} backwards {"), "} backwards {");
        let err = decode::<Probe>("no json here").unwrap_err();
        assert_eq!(
            err,
            GatewayError::MalformedResponse("Failed to parse AI response as JSON".into())
        );
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = decode::<Probe>("{\"feedback\": 3}").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(msg) if msg.contains("unexpected shape")));
    }
}
