//! Scrollbar shared by list-like widgets.
//!
//! The scrollbar does not own the rows it scrolls. The owning widget keeps
//! its collection behind a [`ScrollBinding`] and passes it in on every call,
//! so tables and chat logs share one implementation while keeping their
//! own storage and growth direction.

use trellis_core::{Rect, Renderer, Style, Theme, Vec2};

use crate::element::resolve_style;

/// Row count and scroll offset of the collection a scrollbar drives.
pub trait ScrollBinding {
    fn row_count(&self) -> usize;
    fn offset(&self) -> usize;
    fn set_offset(&mut self, offset: usize);
}

/// Rows plus the index of the first visible one.
#[derive(Clone, Debug)]
pub struct RowList<T> {
    pub rows: Vec<T>,
    pub display_start: usize,
}

impl<T> Default for RowList<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            display_start: 0,
        }
    }
}

impl<T> ScrollBinding for RowList<T> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }
    fn offset(&self) -> usize {
        self.display_start
    }
    fn set_offset(&mut self, offset: usize) {
        self.display_start = offset;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    start_y: f32,
    offset_at_press: usize,
}

#[derive(Clone, Debug)]
pub struct Scrollbar {
    /// Top-left of the track in the owner's local space.
    pub origin: Vec2,
    height: f32,
    max_rows: usize,
    bar_width: f32,
    /// 1 for lists growing downward, -1 for logs growing upward from origin.
    direction: f32,
    hidden: bool,
    thumb_size: f32,
    thumb_pos: f32,
    hovered: bool,
    drag: Option<Drag>,
    style: Style,
}

impl Scrollbar {
    pub fn new(origin: Vec2, height: f32, max_rows: usize, bar_width: f32) -> Self {
        Self {
            origin,
            height,
            max_rows,
            bar_width,
            direction: 1.0,
            hidden: false,
            thumb_size: 1.0,
            thumb_pos: 0.0,
            hovered: false,
            drag: None,
            style: Style::none(),
        }
    }

    /// Offsets count upward from the origin instead of downward.
    pub fn reversed(mut self) -> Self {
        self.direction = -1.0;
        self
    }

    pub fn is_reversed(&self) -> bool {
        self.direction < 0.0
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Visible share of the collection, in `(0, 1]`.
    pub fn thumb_size(&self) -> f32 {
        self.thumb_size
    }

    /// Signed thumb offset as a share of the track.
    pub fn thumb_pos(&self) -> f32 {
        self.thumb_pos
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    pub fn restyle(&mut self, theme: Option<&Theme>, style_name: &str) {
        self.style = resolve_style(theme, "scrollbar", style_name);
    }

    fn max_offset(&self, owner: &impl ScrollBinding) -> usize {
        owner.row_count().saturating_sub(self.max_rows)
    }

    fn clamp_to(&self, owner: &impl ScrollBinding, offset: isize) -> usize {
        (offset.max(0) as usize).min(self.max_offset(owner))
    }

    pub fn scroll_by(&mut self, owner: &mut impl ScrollBinding, delta: isize) {
        if self.hidden {
            return;
        }
        let target = self.clamp_to(owner, owner.offset() as isize + delta);
        owner.set_offset(target);
        self.recompute_thumb(owner);
    }

    /// Re-clamps the owner's offset and recomputes the thumb geometry.
    pub fn recompute_thumb(&mut self, owner: &mut impl ScrollBinding) {
        let offset = owner.offset().min(self.max_offset(owner));
        owner.set_offset(offset);

        let rows = owner.row_count();
        if rows == 0 {
            self.thumb_size = 1.0;
            self.thumb_pos = 0.0;
            self.drag = None;
            return;
        }

        self.thumb_size = (self.max_rows as f32 / rows as f32).min(1.0);
        if self.thumb_size >= 1.0 {
            self.drag = None;
        }
        self.thumb_pos = offset as f32 / rows as f32 * self.direction;
    }

    pub fn reset(&mut self, owner: &mut impl ScrollBinding) {
        owner.set_offset(0);
        self.recompute_thumb(owner);
    }

    pub fn set_hidden(&mut self, owner: &mut impl ScrollBinding, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.drag = None;
        }
        self.recompute_thumb(owner);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Whether `p` (owner-local) is over the thumb.
    pub fn is_hovered(&self, p: Vec2) -> bool {
        let local = p - self.origin;
        let y = local.y * self.direction;
        let top = self.thumb_pos * self.height * self.direction;
        local.x > 0.0
            && local.x < self.bar_width
            && y > top
            && y < top + self.thumb_size * self.height
    }

    pub fn update(&mut self, owner: &mut impl ScrollBinding, p: Vec2) {
        self.hovered = self.is_hovered(p) || self.drag.is_some();

        let Some(drag) = self.drag else {
            return;
        };
        let rows = owner.row_count();
        let moved = (p.y - self.origin.y - drag.start_y) * self.direction;
        let steps = (moved.abs() * rows as f32 / self.height).floor() as isize;
        let steps = if moved > 0.0 { steps } else { -steps };

        let target = self.clamp_to(owner, drag.offset_at_press as isize + steps);
        owner.set_offset(target);
        self.recompute_thumb(owner);
    }

    /// Starts a drag when pressed on the thumb. Returns whether it did.
    pub fn pointer_down(&mut self, owner: &impl ScrollBinding, p: Vec2) -> bool {
        if self.hidden || self.thumb_size >= 1.0 || !self.is_hovered(p) {
            return false;
        }
        self.drag = Some(Drag {
            start_y: p.y - self.origin.y,
            offset_at_press: owner.offset(),
        });
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Wheel scrolling, in rows of 100 delta units. Ignored while dragging
    /// or when the pointer is not over the owner.
    pub fn wheel(&mut self, owner: &mut impl ScrollBinding, dy: f32, owner_hovered: bool) {
        if self.drag.is_some() || !owner_hovered || dy == 0.0 {
            return;
        }
        let mut rows = (dy / 100.0).round() as isize;
        if rows == 0 {
            rows = dy.signum() as isize;
        }
        if self.is_reversed() {
            rows = -rows;
        }
        self.scroll_by(owner, rows);
    }

    pub fn show(&self, r: &mut dyn Renderer) {
        if self.hidden || self.thumb_size >= 1.0 {
            return;
        }
        let style = &self.style;
        r.fill_opt(style.colour_if("fill", "hover", self.hovered));
        r.stroke_opt(style.colour_if("stroke", "hover", self.hovered), 1.0);

        let h = self.thumb_size * self.height;
        let mut y = self.origin.y + self.thumb_pos * self.height;
        if self.is_reversed() {
            y -= h;
        }
        r.rect(Rect::new(self.origin.x, y, self.bar_width, h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(rows: usize) -> RowList<usize> {
        RowList {
            rows: (0..rows).collect(),
            display_start: 0,
        }
    }

    #[test]
    fn test_scroll_clamps_to_last_page() {
        let mut rows = list(20);
        let mut bar = Scrollbar::new(Vec2::ZERO, 300.0, 10, 10.0);
        bar.recompute_thumb(&mut rows);

        bar.scroll_by(&mut rows, 15);
        assert_eq!(rows.display_start, 10);
        assert_eq!(bar.thumb_size(), 0.5);
        assert_eq!(bar.thumb_pos(), 0.5);

        bar.scroll_by(&mut rows, -40);
        assert_eq!(rows.display_start, 0);
    }

    #[test]
    fn test_offset_stays_in_range() {
        for count in 0..25 {
            for delta in [-30isize, -3, -1, 0, 1, 4, 9, 30] {
                let mut rows = list(count);
                rows.display_start = 3;
                let mut bar = Scrollbar::new(Vec2::ZERO, 100.0, 5, 10.0);
                bar.recompute_thumb(&mut rows);
                assert!(rows.display_start <= count.saturating_sub(5));
                bar.scroll_by(&mut rows, delta);
                assert!(rows.display_start <= count.saturating_sub(5));
            }
        }
    }

    #[test]
    fn test_short_list_hides_thumb_and_stops_drag() {
        let mut rows = list(20);
        let mut bar = Scrollbar::new(Vec2::ZERO, 100.0, 10, 10.0);
        bar.recompute_thumb(&mut rows);
        assert!(bar.pointer_down(&rows, Vec2::new(5.0, 10.0)));

        rows.rows.truncate(4);
        bar.recompute_thumb(&mut rows);
        assert_eq!(bar.thumb_size(), 1.0);
        assert!(!bar.is_dragging());

        rows.rows.clear();
        bar.recompute_thumb(&mut rows);
        assert_eq!(bar.thumb_size(), 1.0);
        assert_eq!(bar.thumb_pos(), 0.0);
    }

    #[test]
    fn test_drag_moves_whole_rows() {
        let mut rows = list(20);
        let mut bar = Scrollbar::new(Vec2::new(90.0, 0.0), 100.0, 10, 10.0);
        bar.recompute_thumb(&mut rows);

        assert!(bar.pointer_down(&rows, Vec2::new(95.0, 20.0)));
        // 12px of a 100px track over 20 rows is 2.4 rows.
        bar.update(&mut rows, Vec2::new(95.0, 32.0));
        assert_eq!(rows.display_start, 2);

        bar.update(&mut rows, Vec2::new(95.0, 400.0));
        assert_eq!(rows.display_start, 10);

        bar.pointer_up();
        bar.update(&mut rows, Vec2::new(95.0, 0.0));
        assert_eq!(rows.display_start, 10);
    }

    #[test]
    fn test_wheel_needs_hover_and_no_drag() {
        let mut rows = list(30);
        let mut bar = Scrollbar::new(Vec2::ZERO, 100.0, 10, 10.0);
        bar.recompute_thumb(&mut rows);

        bar.wheel(&mut rows, 100.0, false);
        assert_eq!(rows.display_start, 0);
        bar.wheel(&mut rows, 300.0, true);
        assert_eq!(rows.display_start, 3);
        bar.wheel(&mut rows, 10.0, true);
        assert_eq!(rows.display_start, 4);

        assert!(bar.pointer_down(&rows, Vec2::new(5.0, 20.0)));
        bar.wheel(&mut rows, 100.0, true);
        assert_eq!(rows.display_start, 4);
    }

    #[test]
    fn test_reversed_thumb_grows_upward() {
        let mut rows = list(20);
        let mut bar = Scrollbar::new(Vec2::ZERO, 100.0, 5, 10.0).reversed();
        bar.recompute_thumb(&mut rows);
        assert_eq!(bar.thumb_pos(), 0.0);
        // Thumb covers y in (-25, 0).
        assert!(bar.is_hovered(Vec2::new(5.0, -10.0)));
        assert!(!bar.is_hovered(Vec2::new(5.0, 10.0)));

        bar.wheel(&mut rows, -200.0, true);
        assert_eq!(rows.display_start, 2);
        assert_eq!(bar.thumb_pos(), -0.1);
    }

    #[test]
    fn test_hidden_scrollbar_ignores_scrolling() {
        let mut rows = list(20);
        let mut bar = Scrollbar::new(Vec2::ZERO, 100.0, 5, 10.0);
        bar.set_hidden(&mut rows, true);
        bar.scroll_by(&mut rows, 3);
        assert_eq!(rows.display_start, 0);
        assert!(!bar.pointer_down(&rows, Vec2::new(5.0, 5.0)));
    }
}
