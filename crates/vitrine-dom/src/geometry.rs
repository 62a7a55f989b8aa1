//! Geometry
//!
//! Document-coordinate rectangles and the margin shorthand used to grow
//! or shrink the viewport before intersection tests.

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Signed area. Zero or negative means the rectangle is empty.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the point lies inside or on the edge of the rectangle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grows the rectangle outward by the given margins.
    ///
    /// Negative margins shrink the corresponding edge inward.
    pub fn expand_by(&self, margins: &Margins) -> Rect {
        Rect::new(
            self.x - margins.left,
            self.y - margins.top,
            self.width + margins.left + margins.right,
            self.height + margins.top + margins.bottom,
        )
    }
}

/// Per-edge pixel offsets parsed from CSS margin shorthand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Parses shorthand such as `"0px 0px -50px 0px"`.
    ///
    /// One to four values expand the way CSS margins do. Values may carry
    /// a `px` suffix or be bare numbers. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = Vec::with_capacity(4);
        for token in value.split_whitespace() {
            parts.push(parse_px(token)?);
        }
        match parts.as_slice() {
            [all] => Some(Self::uniform(*all)),
            [v, h] => Some(Self { top: *v, right: *h, bottom: *v, left: *h }),
            [t, h, b] => Some(Self { top: *t, right: *h, bottom: *b, left: *h }),
            [t, r, b, l] => Some(Self { top: *t, right: *r, bottom: *b, left: *l }),
            _ => None,
        }
    }

    /// The same offset on every edge.
    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

fn parse_px(token: &str) -> Option<f64> {
    let digits = token.strip_suffix("px").unwrap_or(token);
    digits.parse().ok()
}
