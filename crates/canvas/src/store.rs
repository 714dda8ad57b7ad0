//! In-memory ordered block collection.
//!
//! Insertion order is display order: the last block in the list paints
//! on top. Unknown ids are ignored by `update` and `delete`.

use crate::block::{Block, BlockContent, BlockId, BlockKind, BlockPatch};

#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block of `kind` with its default geometry and payload.
    pub fn add(&mut self, kind: BlockKind) -> &Block {
        let block = Block::with_defaults(kind);
        log::debug!("add {} block {}", kind, block.id);
        let idx = self.blocks.len();
        self.blocks.push(block);
        &self.blocks[idx]
    }

    /// Merge `patch` into the block with `id`.
    ///
    /// Size is clamped to the block minimums here. A text patch on a
    /// product card, or a product patch on a text block, is dropped:
    /// the block type never changes after creation.
    pub fn update(&mut self, id: BlockId, patch: BlockPatch) {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            log::debug!("update ignored, no block {}", id);
            return;
        };

        if let Some(position) = patch.position {
            block.position = position.clamped();
        }

        match (&mut block.content, patch.content, patch.product) {
            (BlockContent::Headline(text) | BlockContent::Text(text), Some(content), _) => {
                *text = content;
            }
            (BlockContent::Product(product), _, Some(replacement)) => {
                *product = replacement;
            }
            _ => {}
        }
    }

    pub fn delete(&mut self, id: BlockId) {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        if self.blocks.len() != before {
            log::debug!("deleted block {}", id);
        }
    }

    pub fn list(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
