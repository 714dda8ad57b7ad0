// Reading model output into an article

use pressroom_core::{ComparisonData, GenerateError};

/// Parse the model's text as a `ComparisonData`.
///
/// Accepts bare JSON, or JSON wrapped in prose or a markdown fence (the
/// outermost `{...}` is tried when the whole text does not parse).
pub fn parse_comparison(content: &str) -> Result<ComparisonData, GenerateError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }

    let err = match serde_json::from_str::<ComparisonData>(content) {
        Ok(data) => return Ok(data),
        Err(e) => e,
    };

    if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
        if start < end {
            if let Ok(data) = serde_json::from_str::<ComparisonData>(&content[start..=end]) {
                log::warn!("model response contained extra text around JSON");
                return Ok(data);
            }
        }
    }

    Err(GenerateError::Parse(err.to_string()))
}
