//! Pointer-driven split between the description and solution panes.

use ratatui::layout::Rect;

pub const MIN_LEFT_PCT: f32 = 20.0;
pub const MAX_LEFT_PCT: f32 = 45.0;
pub const DEFAULT_LEFT_PCT: f32 = 38.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging { origin_x: f32, origin_pct: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    left_pct: f32,
    phase: Phase,
}

impl Default for ResizeState {
    fn default() -> Self {
        Self {
            left_pct: DEFAULT_LEFT_PCT,
            phase: Phase::Idle,
        }
    }
}

impl ResizeState {
    pub fn left_percent(&self) -> f32 {
        self.left_pct
    }

    pub fn right_percent(&self) -> f32 {
        100.0 - self.left_pct
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Idle → Dragging, remembering where the drag started.
    pub fn begin(&mut self, pointer_x: f32) {
        self.phase = Phase::Dragging {
            origin_x: pointer_x,
            origin_pct: self.left_pct,
        };
    }

    /// Recompute the split for a pointer move. Ignored while idle.
    pub fn drag_to(&mut self, pointer_x: f32, container_width: f32) {
        let Phase::Dragging {
            origin_x,
            origin_pct,
        } = self.phase
        else {
            return;
        };
        if container_width <= 0.0 {
            return;
        }
        let delta = ((pointer_x - origin_x) / container_width) * 100.0;
        self.left_pct = clamp_percent(origin_pct + delta);
    }

    /// Dragging → Idle. Safe to call when already idle.
    pub fn end(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Split `area` into exact left/right column ranges for the current percent.
    pub fn split(&self, area: Rect) -> [Rect; 2] {
        let left = ((f32::from(area.width) * self.left_pct / 100.0).round() as u16).min(area.width);
        [
            Rect {
                width: left,
                ..area
            },
            Rect {
                x: area.x + left,
                width: area.width - left,
                ..area
            },
        ]
    }
}

fn clamp_percent(pct: f32) -> f32 {
    if pct.is_nan() {
        return DEFAULT_LEFT_PCT;
    }
    pct.clamp(MIN_LEFT_PCT, MAX_LEFT_PCT)
}
