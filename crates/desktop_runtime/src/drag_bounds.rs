//! Drag constraints for windows on tablet and desktop breakpoints.

use serde::{Deserialize, Serialize};

use crate::viewport::{Breakpoint, Viewport};

/// How far past the top/left edge a window may be dragged.
pub const DRAG_EDGE_OFFSET: i32 = -50;
/// Distance from the right/bottom edge that always stays reachable.
pub const DRAG_EDGE_RESERVE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Rectangle a window's top-left corner may be dragged within.
pub struct DragBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DragBounds {
    /// Clamps a proposed window position into the bounds.
    ///
    /// On viewports narrow enough that `right < left`, the left/top edge wins.
    pub fn clamp_position(self, x: i32, y: i32) -> (i32, i32) {
        (
            x.min(self.right).max(self.left),
            y.min(self.bottom).max(self.top),
        )
    }
}

/// Returns the drag rectangle for `breakpoint`, or `None` when dragging is disabled (mobile).
pub fn bounds(breakpoint: Breakpoint, viewport: Viewport) -> Option<DragBounds> {
    if breakpoint.is_mobile() {
        return None;
    }
    Some(DragBounds {
        left: DRAG_EDGE_OFFSET,
        top: DRAG_EDGE_OFFSET,
        right: viewport.width - DRAG_EDGE_RESERVE,
        bottom: viewport.height - DRAG_EDGE_RESERVE,
    })
}
