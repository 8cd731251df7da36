use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x: cx - w * 0.5,
            y: cy - h * 0.5,
            w,
            h,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Hit test that excludes the edges. Widgets use this so that two
    /// touching elements never both claim the pointer.
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }
}

/// Pan/zoom mapping the virtual canvas into the host window.
///
/// `offset` is the window-space position of the canvas origin and `zoom` the
/// uniform scale applied to canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Largest centred fit of `canvas` inside `window`, leaving `1 - buffer`
    /// of the limiting axis as margin.
    pub fn fit(window: Size, canvas: Size, buffer: f32) -> Self {
        if window.height <= 0.0 || canvas.height <= 0.0 {
            return Self::identity();
        }
        let window_ratio = window.width / window.height;
        let canvas_ratio = canvas.width / canvas.height;

        let zoom = if window_ratio > canvas_ratio {
            window.height / canvas.height * buffer
        } else {
            window.width / canvas.width * buffer
        };

        Self {
            offset: Vec2::new(
                0.5 * (window.width - canvas.width * zoom),
                0.5 * (window.height - canvas.height * zoom),
            ),
            zoom,
        }
    }

    /// Window coordinates -> canvas coordinates.
    pub fn to_canvas(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.offset.x) / self.zoom,
            (p.y - self.offset.y) / self.zoom,
        )
    }

    /// Canvas coordinates -> window coordinates.
    pub fn to_window(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.zoom + self.offset.x,
            p.y * self.zoom + self.offset.y,
        )
    }

    /// Whether a window-space point lies strictly inside the drawn canvas.
    pub fn covers(&self, window: Size, p: Vec2) -> bool {
        p.x > self.offset.x
            && p.y > self.offset.y
            && p.x < window.width - self.offset.x
            && p.y < window.height - self.offset.y
    }
}
