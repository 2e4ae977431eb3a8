use serde::{Deserialize, Serialize};

/// One client rectangle, in viewport coordinates (CSS px).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    /// A rect with no area cannot be pointed at and never becomes a record.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rect covering every rect in `rects`, or `None` when empty.
    pub fn bounding(rects: &[Rect]) -> Option<Rect> {
        let first = rects.first()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.left(), first.top(), first.right(), first.bottom());

        for r in &rects[1..] {
            left = left.min(r.left());
            top = top.min(r.top());
            right = right.max(r.right());
            bottom = bottom.max(r.bottom());
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Standard overlap test against the viewport grown by `expansion` px on
    /// every side. Touching edges count as intersecting.
    pub fn intersects(&self, rect: &Rect, expansion: f64) -> bool {
        !(rect.bottom() < -expansion
            || rect.top() > self.height + expansion
            || rect.right() < -expansion
            || rect.left() > self.width + expansion)
    }

    pub fn intersects_any(&self, rects: &[Rect], expansion: f64) -> bool {
        rects.iter().any(|r| self.intersects(r, expansion))
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
