// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and stacked pane layout.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32 && x < self.right as f32 && y >= self.top as f32 && y < self.bottom as f32
    }
}

/// Lay out rows of the given heights top to bottom, all `width` wide.
pub fn stack_rows(width: i32, heights: &[i32]) -> Vec<RectI32> {
    let mut top = 0;
    heights
        .iter()
        .map(|&h| {
            let r = RectI32::from_ltwh(0, top, width, h.max(0));
            top = r.bottom;
            r
        })
        .collect()
}
