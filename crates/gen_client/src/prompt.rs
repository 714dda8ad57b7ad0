// Prompt and response schema for comparison generation

use serde_json::{json, Value};

/// Build the generation prompt for two products.
pub fn build_prompt(product_a: &str, product_b: &str, today: &str) -> String {
    format!(
        r#"Perform a detailed journalistic comparison between {a} and {b}.
Provide a professional analysis including specific pros and cons for each, a price comparison, and an affiliate-marketing friendly summary.
Determine which product wins for different use cases.
Today's date is {today}.
Return the result in a JSON structure that looks like this:
{{
  "title": "A catchy newspaper headline",
  "subtitle": "A journalistic subheadline",
  "date": "{today}",
  "category": "the product niche",
  "summary": "overview of the battle",
  "productA": {{ "name": "{a}", "pros": ["..."], "cons": ["..."], "priceRange": "$...", "affiliateUrl": "search for a common store link", "rating": 4.5 }},
  "productB": {{ "name": "{b}", "pros": ["..."], "cons": ["..."], "priceRange": "$...", "affiliateUrl": "search for a common store link", "rating": 4.2 }},
  "verdict": "the definitive final word",
  "author": "The Editorial Board"
}}"#,
        a = product_a,
        b = product_b,
        today = today,
    )
}

fn product_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cons": { "type": "ARRAY", "items": { "type": "STRING" } },
            "priceRange": { "type": "STRING" },
            "affiliateUrl": { "type": "STRING" },
            "rating": { "type": "NUMBER" }
        },
        "required": ["name", "pros", "cons", "priceRange", "affiliateUrl", "rating"]
    })
}

/// Structured-output schema matching `ComparisonData`'s wire names.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "subtitle": { "type": "STRING" },
            "date": { "type": "STRING" },
            "category": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "productA": product_schema(),
            "productB": product_schema(),
            "verdict": { "type": "STRING" },
            "author": { "type": "STRING" }
        },
        "required": [
            "title", "subtitle", "date", "category", "summary",
            "productA", "productB", "verdict", "author"
        ]
    })
}
