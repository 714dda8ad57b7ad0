use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Free-form price band, e.g. "$299 - $349"
    pub price_range: String,
    pub affiliate_url: String,
    /// 0-5 star rating
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductDetails {
    /// Blank product used by a fresh draft.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            price_range: "$$$".to_string(),
            affiliate_url: "#".to_string(),
            rating: 5.0,
            image_url: Some(String::new()),
        }
    }

    /// Display name, or "Product A"/"Product B" while unnamed.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.name.trim().is_empty() {
            fallback
        } else {
            &self.name
        }
    }
}

/// The structured article payload. Field names on the wire match what
/// the generation model is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonData {
    /// Headline
    pub title: String,
    pub subtitle: String,
    pub date: String,
    /// Product niche
    pub category: String,
    pub summary: String,
    pub product_a: ProductDetails,
    pub product_b: ProductDetails,
    pub verdict: String,
    /// Byline
    pub author: String,
}

impl ComparisonData {
    /// Starting draft before anything is generated or typed, dated today.
    pub fn draft() -> Self {
        Self::draft_on(Local::now().date_naive())
    }

    pub fn draft_on(date: NaiveDate) -> Self {
        Self {
            title: "New Product Comparison".to_string(),
            subtitle: "Investigating the latest market trends and consumer value.".to_string(),
            date: format_dateline(date),
            category: "General".to_string(),
            summary: "In today's fast-moving market, choosing the right tool for the job is \
                      harder than ever. We dive into the details."
                .to_string(),
            product_a: ProductDetails::blank(),
            product_b: ProductDetails::blank(),
            verdict: "Awaiting final analysis.".to_string(),
            author: "Editorial Staff".to_string(),
        }
    }
}

impl Default for ComparisonData {
    fn default() -> Self {
        Self::draft()
    }
}

/// A citation returned by search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// "Month D, YYYY", e.g. "March 5, 2026".
pub fn format_dateline(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = ComparisonData::draft_on(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(draft.title, "New Product Comparison");
        assert_eq!(draft.date, "March 5, 2026");
        assert_eq!(draft.category, "General");
        assert_eq!(draft.product_a.price_range, "$$$");
        assert_eq!(draft.product_a.affiliate_url, "#");
        assert_eq!(draft.product_b.rating, 5.0);
        assert_eq!(draft.author, "Editorial Staff");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(ComparisonData::draft()).unwrap();
        assert!(json.get("productA").is_some());
        assert!(json["productA"].get("priceRange").is_some());
        assert!(json["productA"].get("affiliateUrl").is_some());
    }

    #[test]
    fn test_image_url_optional() {
        let json = r#"{"name":"X","pros":[],"cons":[],"priceRange":"$1","affiliateUrl":"https://shop.example/x","rating":4.5}"#;
        let p: ProductDetails = serde_json::from_str(json).unwrap();
        assert!(p.image_url.is_none());
        assert_eq!(p.rating, 4.5);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut p = ProductDetails::blank();
        assert_eq!(p.display_name("Product A"), "Product A");
        p.name = "Canon R6II".into();
        assert_eq!(p.display_name("Product A"), "Canon R6II");
    }
}
