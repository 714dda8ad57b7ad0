//! Free-form block canvas.
//!
//! Positioned headline, paragraph and product-card blocks, moved and
//! resized through explicit pointer sessions. No GUI concepts: drivers
//! feed [`PointerEvent`]s and read [`BlockView`]s back.

pub mod block;
pub mod drag;
pub mod render;
pub mod resize;
pub mod session;
pub mod store;

pub use block::{
    join_lines, split_lines, Block, BlockContent, BlockId, BlockKind, BlockPatch, Point, Position,
    ProductData, MIN_BLOCK_HEIGHT, MIN_BLOCK_WIDTH,
};
pub use render::{BlockBody, BlockView, FieldEdit};
pub use session::{Affordance, EditorSession, Interaction, PointerEvent};
pub use store::BlockStore;
