// Drag session: relocate one block by its move handle.
//
// Offsets are computed from the pointer position at session start, not
// from the previous move event, so dropped or coalesced move events
// never accumulate error.

use crate::block::{BlockId, Point, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Block being moved
    pub block_id: BlockId,
    /// Pointer position at mouse-down
    pub start_pointer: Point,
    /// Block offset at mouse-down
    pub start_origin: Point,
}

impl DragSession {
    pub fn begin(block_id: BlockId, pointer: Point, current: Position) -> Self {
        Self {
            block_id,
            start_pointer: pointer,
            start_origin: current.origin(),
        }
    }

    /// Position for the block with the pointer at `pointer`.
    /// Size is carried over from `current` untouched.
    pub fn position_at(&self, pointer: Point, current: Position) -> Position {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;
        Position {
            x: self.start_origin.x + dx,
            y: self.start_origin.y + dy,
            ..current
        }
    }
}
