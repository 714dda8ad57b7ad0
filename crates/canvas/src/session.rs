//! Editor session: the block store, the lock flag, and the one active
//! pointer interaction, owned together.
//!
//! ```text
//!            begin_drag               pointer_released / lock / delete
//!   Idle ─────────────────▶ Dragging ─────────────────────────────────▶ Idle
//!   Idle ─────────────────▶ Resizing ─────────────────────────────────▶ Idle
//!            begin_resize
//! ```
//!
//! Sessions are mutually exclusive. While one is active, a second press
//! (on any block, move or resize) is ignored until release. Locking the
//! canvas ends whatever session is active, so move events arriving
//! after the lock change nothing.

use crate::block::{Block, BlockId, BlockKind, BlockPatch, Point, Position};
use crate::drag::DragSession;
use crate::render::{self, BlockView, FieldEdit};
use crate::resize::ResizeSession;
use crate::store::BlockStore;

/// Pointer interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl Interaction {
    pub fn block_id(&self) -> Option<BlockId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(s) => Some(s.block_id),
            Interaction::Resizing(s) => Some(s.block_id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// The block affordance a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    MoveHandle(BlockId),
    ResizeHandle(BlockId),
}

/// Input-agnostic pointer events. Mouse, touch and scripted drivers all
/// reduce to these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { target: Affordance, at: Point },
    Move { at: Point },
    Release,
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    store: BlockStore,
    locked: bool,
    interaction: Interaction,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Blocks ---

    pub fn add_block(&mut self, kind: BlockKind) -> &Block {
        self.store.add(kind)
    }

    pub fn update_block(&mut self, id: BlockId, patch: BlockPatch) {
        self.store.update(id, patch);
    }

    /// Remove a block. Ends the active session if it targets that block.
    pub fn delete_block(&mut self, id: BlockId) {
        if self.interaction.block_id() == Some(id) {
            self.end_interaction("block deleted");
        }
        self.store.delete(id);
    }

    pub fn blocks(&self) -> &[Block] {
        self.store.list()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.store.get(id)
    }

    /// Apply an edit from a block's text surface. Ignored while locked.
    pub fn apply_edit(&mut self, id: BlockId, edit: FieldEdit) {
        if self.locked {
            return;
        }
        let Some(patch) = self.store.get(id).and_then(|b| edit.to_patch(b)) else {
            return;
        };
        self.store.update(id, patch);
    }

    // --- Lock ---

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        if locked && !self.locked {
            self.end_interaction("canvas locked");
        }
        self.locked = locked;
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.set_locked(!self.locked);
        self.locked
    }

    // --- Pointer sessions ---

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Start dragging `id` from its move handle. Returns false (and
    /// changes nothing) when locked, busy, or the block is unknown.
    pub fn begin_drag(&mut self, id: BlockId, pointer: Point) -> bool {
        let Some(current) = self.startable(id) else {
            return false;
        };
        log::debug!("drag start {}", id);
        self.interaction = Interaction::Dragging(DragSession::begin(id, pointer, current));
        true
    }

    /// Start resizing `id` from its corner handle. Same gating as
    /// [`Self::begin_drag`].
    pub fn begin_resize(&mut self, id: BlockId, pointer: Point) -> bool {
        let Some(current) = self.startable(id) else {
            return false;
        };
        log::debug!("resize start {}", id);
        self.interaction = Interaction::Resizing(ResizeSession::begin(id, pointer, current));
        true
    }

    /// Recompute the active block's position or size for `pointer` and
    /// write it through the store. No-op when idle.
    pub fn pointer_moved(&mut self, pointer: Point) {
        let (id, next) = match self.interaction {
            Interaction::Idle => return,
            Interaction::Dragging(drag) => {
                let Some(block) = self.store.get(drag.block_id) else {
                    return;
                };
                (drag.block_id, drag.position_at(pointer, block.position))
            }
            Interaction::Resizing(resize) => {
                let Some(block) = self.store.get(resize.block_id) else {
                    return;
                };
                (resize.block_id, resize.position_at(pointer, block.position))
            }
        };
        self.store.update(id, BlockPatch::position(next));
    }

    /// End the active session. The last computed position is final.
    pub fn pointer_released(&mut self) {
        self.end_interaction("pointer released");
    }

    /// Dispatch a pointer event. Returns true when the event started a
    /// session or moved/resized a block.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press { target: Affordance::MoveHandle(id), at } => self.begin_drag(id, at),
            PointerEvent::Press { target: Affordance::ResizeHandle(id), at } => self.begin_resize(id, at),
            PointerEvent::Move { at } => {
                let active = !self.interaction.is_idle();
                self.pointer_moved(at);
                active
            }
            PointerEvent::Release => {
                self.pointer_released();
                false
            }
        }
    }

    // --- Rendering ---

    /// Presentation of every block, bottom to top.
    pub fn render(&self) -> Vec<BlockView> {
        self.store
            .list()
            .iter()
            .map(|b| render::view(b, self.locked))
            .collect()
    }

    fn startable(&self, id: BlockId) -> Option<Position> {
        if self.locked || !self.interaction.is_idle() {
            return None;
        }
        self.store.get(id).map(|b| b.position)
    }

    fn end_interaction(&mut self, reason: &str) {
        if let Some(id) = self.interaction.block_id() {
            log::debug!("session on {} ended: {}", id, reason);
        }
        self.interaction = Interaction::Idle;
    }
}
