//! Page geometry, rectangles and colors
//!
//! One layout unit is one millimeter. The origin is the top-left corner of
//! the page and `y` grows downwards; renderers that use a different
//! convention (PDF) flip the axis themselves.

/// Points per millimeter (1 pt = 1/72 in)
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Millimeters per point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Physical page size and uniform margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4_PORTRAIT
    }
}

impl PageGeometry {
    /// A4 portrait, 20 mm margin on every side
    pub const A4_PORTRAIT: Self = Self {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
    };

    /// Left edge of the content area
    pub fn left(&self) -> f32 {
        self.margin
    }

    /// Right edge of the content area
    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    /// Horizontal center of the page
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Width available to content
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// First usable vertical offset
    pub fn printable_top(&self) -> f32 {
        self.margin
    }

    /// Last usable vertical offset
    pub fn printable_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Height of the printable area
    pub fn printable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// The printable area as a rectangle
    pub fn printable_area(&self) -> Rect {
        Rect::new(
            self.left(),
            self.printable_top(),
            self.content_width(),
            self.printable_height(),
        )
    }
}

/// A point in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `y` is the top edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check whether `other` lies entirely inside this rectangle,
    /// allowing for float rounding
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 1e-3;
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BRAND_BLUE: Self = Self::new(37, 99, 235);
    pub const LIGHT_BLUE: Self = Self::new(96, 165, 250);
    pub const NAVY: Self = Self::new(15, 23, 42);
    pub const SLATE_50: Self = Self::new(248, 250, 252);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral gray of the given level
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Channels scaled to `0.0..=1.0`
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}
