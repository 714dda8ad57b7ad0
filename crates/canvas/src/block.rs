//! Block model: identity, geometry and the per-type payload.
//!
//! A block's type is carried by its payload variant, so a headline can
//! never hold product data and a product card never has free text.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest width a resize or position update may leave behind.
pub const MIN_BLOCK_WIDTH: f32 = 100.0;

/// Smallest height a resize or position update may leave behind.
pub const MIN_BLOCK_HEIGHT: f32 = 50.0;

/// Stable block identity. Generated once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the hyphenated form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three block variants the canvas knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Headline,
    Text,
    Product,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [BlockKind::Headline, BlockKind::Text, BlockKind::Product];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Headline => "headline",
            BlockKind::Text => "text",
            BlockKind::Product => "product",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headline" => Some(BlockKind::Headline),
            "text" => Some(BlockKind::Text),
            "product" => Some(BlockKind::Product),
            _ => None,
        }
    }

    /// Where a freshly added block lands and how big it is.
    /// Headlines are wide and short, product cards narrow and tall.
    pub fn default_position(&self) -> Position {
        match self {
            BlockKind::Headline => Position::new(50.0, 50.0, 800.0, 100.0),
            BlockKind::Text => Position::new(50.0, 150.0, 450.0, 400.0),
            BlockKind::Product => Position::new(550.0, 150.0, 350.0, 450.0),
        }
    }

    pub fn default_content(&self) -> BlockContent {
        match self {
            BlockKind::Headline => BlockContent::Headline("New Headline".to_string()),
            BlockKind::Text => BlockContent::Text("Enter your story text here...".to_string()),
            BlockKind::Product => BlockContent::Product(ProductData::placeholder()),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in canvas coordinates (pointer positions, offsets).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Top-left offset and size of a block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Same offset, size raised to the minimums. Offsets are never
    /// clamped: blocks may sit partly or fully off the visible canvas.
    pub fn clamped(self) -> Self {
        Self {
            w: self.w.max(MIN_BLOCK_WIDTH),
            h: self.h.max(MIN_BLOCK_HEIGHT),
            ..self
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Product card payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub name: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub price: f64,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductData {
    /// Payload of a newly added product card: one placeholder strength,
    /// no drawbacks, zero price, empty link.
    pub fn placeholder() -> Self {
        Self {
            name: "New Product".to_string(),
            pros: vec!["Feature 1".to_string()],
            cons: Vec::new(),
            price: 0.0,
            link: String::new(),
            image_url: None,
        }
    }
}

/// The active payload of a block. The variant *is* the block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum BlockContent {
    Headline(String),
    Text(String),
    Product(ProductData),
}

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Headline(_) => BlockKind::Headline,
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Product(_) => BlockKind::Product,
        }
    }
}

/// A positioned, typed unit of content on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub position: Position,
    pub content: BlockContent,
}

impl Block {
    /// Build a block of `kind` with its default geometry and payload.
    pub fn with_defaults(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            position: kind.default_position(),
            content: kind.default_content(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Free text of a headline or text block.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Headline(s) | BlockContent::Text(s) => Some(s),
            BlockContent::Product(_) => None,
        }
    }

    pub fn product(&self) -> Option<&ProductData> {
        match &self.content {
            BlockContent::Product(p) => Some(p),
            _ => None,
        }
    }
}

/// Partial update for [`crate::BlockStore::update`].
///
/// Top-level fields merge shallowly. `position` and `product` are full
/// replacements; callers build them from the current value first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub position: Option<Position>,
    pub content: Option<String>,
    pub product: Option<ProductData>,
}

impl BlockPatch {
    pub fn position(position: Position) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    pub fn product(product: ProductData) -> Self {
        Self { product: Some(product), ..Default::default() }
    }
}

/// Split list-editing text into items.
///
/// Every `'\n'` separates two items. Nothing is trimmed and empty items
/// are kept, so `"Fast\nCheap\n"` yields a trailing `""` and `""` yields
/// a single empty item.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Inverse of [`split_lines`].
pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_respect_minimums() {
        for kind in BlockKind::ALL {
            let pos = kind.default_position();
            assert!(pos.w >= MIN_BLOCK_WIDTH, "{} width", kind);
            assert!(pos.h >= MIN_BLOCK_HEIGHT, "{} height", kind);
        }
    }

    #[test]
    fn test_default_shapes() {
        let headline = BlockKind::Headline.default_position();
        let text = BlockKind::Text.default_position();
        let product = BlockKind::Product.default_position();
        assert!(headline.w > text.w && headline.h < text.h);
        assert!(product.w < headline.w && product.h > text.h);
    }

    #[test]
    fn test_payload_matches_kind() {
        for kind in BlockKind::ALL {
            let block = Block::with_defaults(kind);
            assert_eq!(block.kind(), kind);
            assert_eq!(block.product().is_some(), kind == BlockKind::Product);
            assert_eq!(block.text().is_some(), kind != BlockKind::Product);
        }
    }

    #[test]
    fn test_placeholder_product() {
        let p = ProductData::placeholder();
        assert_eq!(p.pros.len(), 1);
        assert!(p.cons.is_empty());
        assert_eq!(p.price, 0.0);
        assert!(p.link.is_empty());
    }

    #[test]
    fn test_clamped_keeps_offset() {
        let pos = Position::new(-20.0, -5.0, 10.0, 10.0).clamped();
        assert_eq!(pos, Position::new(-20.0, -5.0, 100.0, 50.0));
    }

    #[test]
    fn test_split_lines_keeps_trailing_empty() {
        assert_eq!(split_lines("Fast\nCheap\n"), vec!["Fast", "Cheap", ""]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines(" a \n\nb"), vec![" a ", "", "b"]);
    }

    #[test]
    fn test_join_split_inverse() {
        let items = vec!["Fast".to_string(), String::new(), "Cheap".to_string()];
        assert_eq!(split_lines(&join_lines(&items)), items);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(BlockKind::parse("Headline"), Some(BlockKind::Headline));
        assert_eq!(BlockKind::parse(" product "), Some(BlockKind::Product));
        assert_eq!(BlockKind::parse("image"), None);
    }

    #[test]
    fn test_block_id_display_parse() {
        let id = BlockId::new();
        assert_eq!(BlockId::parse(&id.to_string()), Some(id));
        assert_eq!(BlockId::parse("nope"), None);
    }
}
