//! Drag-to-resize for the chat panel.
//!
//! The panel is docked to the right edge, so its width is the distance from
//! the pointer to the right side of the viewport.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

pub const MIN_WIDTH: f64 = 400.0;
pub const MAX_WIDTH: f64 = 800.0;
pub const DEFAULT_WIDTH: f64 = 540.0;

/// Pointer input delivered to the resize handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down,
    Move { viewport_width: f64, pointer_x: f64 },
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeState {
    width: f64,
    dragging: bool,
}

impl Default for ResizeState {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, dragging: false }
    }
}

impl ResizeState {
    /// Current width, always within `[MIN_WIDTH, MAX_WIDTH]`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer pressed on the resize handle.
    pub fn pointer_down(&mut self) {
        self.dragging = true;
    }

    /// Pointer moved. Ignored unless a drag is in progress or the inputs are
    /// not finite. Returns the width after the move.
    pub fn pointer_move(&mut self, viewport_width: f64, pointer_x: f64) -> f64 {
        if self.dragging {
            let proposed = viewport_width - pointer_x;
            if proposed.is_finite() {
                self.width = clamp_width(proposed);
            }
        }
        self.width
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down => self.pointer_down(),
            PointerEvent::Move { viewport_width, pointer_x } => {
                self.pointer_move(viewport_width, pointer_x);
            }
            PointerEvent::Up => self.pointer_up(),
        }
    }
}

#[must_use]
pub fn clamp_width(width: f64) -> f64 {
    width.clamp(MIN_WIDTH, MAX_WIDTH)
}
