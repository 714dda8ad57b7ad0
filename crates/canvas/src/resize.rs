// Resize session: change width/height from the bottom-right corner.
// The top-left corner stays anchored.

use crate::block::{BlockId, Point, Position, MIN_BLOCK_HEIGHT, MIN_BLOCK_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    /// Block being resized
    pub block_id: BlockId,
    /// Pointer position at mouse-down
    pub start_pointer: Point,
    /// Width at mouse-down
    pub start_w: f32,
    /// Height at mouse-down
    pub start_h: f32,
}

impl ResizeSession {
    pub fn begin(block_id: BlockId, pointer: Point, current: Position) -> Self {
        Self {
            block_id,
            start_pointer: pointer,
            start_w: current.w,
            start_h: current.h,
        }
    }

    /// Position for the block with the pointer at `pointer`, size
    /// clamped to the minimums. There is no maximum.
    pub fn position_at(&self, pointer: Point, current: Position) -> Position {
        let w = self.start_w + (pointer.x - self.start_pointer.x);
        let h = self.start_h + (pointer.y - self.start_pointer.y);
        Position {
            w: w.max(MIN_BLOCK_WIDTH),
            h: h.max(MIN_BLOCK_HEIGHT),
            ..current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow() {
        let start = Position::new(50.0, 150.0, 450.0, 400.0);
        let session = ResizeSession::begin(BlockId::new(), Point::new(500.0, 550.0), start);
        let resized = session.position_at(Point::new(600.0, 560.0), start);
        assert_eq!(resized, Position::new(50.0, 150.0, 550.0, 410.0));
    }

    #[test]
    fn test_clamps_to_minimum() {
        let start = Position::new(50.0, 150.0, 450.0, 400.0);
        let session = ResizeSession::begin(BlockId::new(), Point::new(500.0, 550.0), start);
        let resized = session.position_at(Point::new(0.0, 50.0), start);
        assert_eq!(resized.w, 100.0);
        assert_eq!(resized.h, 50.0);
        assert_eq!(resized.origin(), start.origin());
    }

    #[test]
    fn test_shrink_then_grow_uses_start_size() {
        let start = Position::new(0.0, 0.0, 300.0, 300.0);
        let session = ResizeSession::begin(BlockId::new(), Point::new(300.0, 300.0), start);
        let small = session.position_at(Point::new(-1000.0, -1000.0), start);
        let back = session.position_at(Point::new(320.0, 310.0), small);
        assert_eq!((back.w, back.h), (320.0, 310.0));
    }
}
