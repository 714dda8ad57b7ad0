//! Render adapter: block + lock flag → presentation model.
//!
//! The adapter decides *what* is shown and whether it is interactive;
//! drawing it is the front-end's job. Edits coming back from the
//! editable surfaces are turned into [`BlockPatch`]es by [`FieldEdit`].

use serde::Serialize;

use crate::block::{join_lines, split_lines, Block, BlockContent, BlockId, BlockPatch, Position, ProductData};

/// Headline font size never exceeds this, however wide the block.
pub const HEADLINE_MAX_FONT_SIZE: f32 = 80.0;

/// Label of the product card call-to-action.
pub const BUY_LABEL: &str = "Buy Now \u{2192}";

/// Headline font size scales with block width, capped.
pub fn headline_font_size(width: f32) -> f32 {
    (width / 10.0).min(HEADLINE_MAX_FONT_SIZE)
}

/// Interactive chrome around an unlocked block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    /// Label on the move handle (the only drag start surface)
    pub move_handle: &'static str,
    /// Delete button is shown
    pub delete: bool,
    /// Bottom-right resize handle is shown
    pub resize_handle: bool,
}

impl Controls {
    fn unlocked() -> Self {
        Self {
            move_handle: "Drag to Move",
            delete: true,
            resize_handle: true,
        }
    }
}

/// A single-line or multi-line text surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextField {
    pub value: String,
    pub placeholder: &'static str,
    pub editable: bool,
}

/// A list shown and edited as one item per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListField {
    pub label: &'static str,
    pub text: String,
    pub placeholder: &'static str,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockBody {
    /// Large centered text
    Headline { text: TextField, font_size: f32 },
    /// Justified paragraph
    Paragraph { text: TextField },
    ProductCard {
        name: TextField,
        pros: ListField,
        cons: ListField,
        link: TextField,
        cta: CallToAction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub id: BlockId,
    pub position: Position,
    /// `None` while the canvas is locked
    pub controls: Option<Controls>,
    pub body: BlockBody,
}

impl BlockView {
    pub fn is_interactive(&self) -> bool {
        self.controls.is_some()
    }
}

/// Presentation of `block` under the current lock state.
pub fn view(block: &Block, locked: bool) -> BlockView {
    let editable = !locked;
    let body = match &block.content {
        BlockContent::Headline(text) => BlockBody::Headline {
            text: TextField { value: text.clone(), placeholder: "", editable },
            font_size: headline_font_size(block.position.w),
        },
        BlockContent::Text(text) => BlockBody::Paragraph {
            text: TextField { value: text.clone(), placeholder: "", editable },
        },
        BlockContent::Product(product) => product_card(product, editable),
    };

    BlockView {
        id: block.id,
        position: block.position,
        controls: editable.then(Controls::unlocked),
        body,
    }
}

fn product_card(product: &ProductData, editable: bool) -> BlockBody {
    BlockBody::ProductCard {
        name: TextField {
            value: product.name.clone(),
            placeholder: "Product Name",
            editable,
        },
        pros: ListField {
            label: "Strengths",
            text: join_lines(&product.pros),
            placeholder: "One pro per line...",
            editable,
        },
        cons: ListField {
            label: "Drawbacks",
            text: join_lines(&product.cons),
            placeholder: "One con per line...",
            editable,
        },
        link: TextField {
            value: product.link.clone(),
            placeholder: "Affiliate Link URL",
            editable,
        },
        cta: CallToAction {
            label: BUY_LABEL,
            href: product.link.clone(),
        },
    }
}

/// An edit made on one of a block's text surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Headline or paragraph text
    Content(String),
    ProductName(String),
    /// Full newline-delimited strengths text
    Pros(String),
    /// Full newline-delimited drawbacks text
    Cons(String),
    Link(String),
}

impl FieldEdit {
    /// Patch applying this edit to `block`, or `None` when the edit
    /// targets a surface the block does not have.
    ///
    /// Lists are re-split from the full text and replaced wholesale.
    pub fn to_patch(&self, block: &Block) -> Option<BlockPatch> {
        match (self, &block.content) {
            (FieldEdit::Content(text), BlockContent::Headline(_) | BlockContent::Text(_)) => {
                Some(BlockPatch::content(text.clone()))
            }
            (FieldEdit::Content(_), BlockContent::Product(_)) => None,
            (edit, BlockContent::Product(current)) => {
                let mut product = current.clone();
                match edit {
                    FieldEdit::ProductName(name) => product.name = name.clone(),
                    FieldEdit::Pros(text) => product.pros = split_lines(text),
                    FieldEdit::Cons(text) => product.cons = split_lines(text),
                    FieldEdit::Link(link) => product.link = link.clone(),
                    FieldEdit::Content(_) => return None,
                }
                Some(BlockPatch::product(product))
            }
            _ => None,
        }
    }
}
