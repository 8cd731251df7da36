//! Single-line text editing: value, caret, selection and the visible window.
//!
//! Positions are grapheme indices (`0..=len`). Only a contiguous slice of the
//! value is shown, the *window*, sized so its rendered width fits the field.
//! The window is anchored either to its left edge (growing rightward) or to
//! its right edge (growing leftward) and always contains the caret.

use std::ops::Range;

use trellis_core::TextMeasure;
use unicode_segmentation::UnicodeSegmentation;

fn grapheme_bounds(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds
}

#[derive(Clone, Debug)]
pub struct TextEdit {
    value: String,
    /// Byte offset of every grapheme boundary, `len() + 1` entries.
    bounds: Vec<usize>,
    cursor: usize,
    anchor: usize,
    window: Range<usize>,
    fixed_left: bool,
    visible_width: f32,
    area_width: f32,
    text_size: f32,
    max_length: usize,
    moved: u32,
}

impl TextEdit {
    /// `max_length` of 0 means unlimited.
    pub fn new(
        value: impl Into<String>,
        area_width: f32,
        text_size: f32,
        max_length: usize,
        m: &dyn TextMeasure,
    ) -> Self {
        let value = value.into();
        let bounds = grapheme_bounds(&value);
        let len = bounds.len() - 1;
        let mut edit = Self {
            value,
            bounds,
            cursor: len,
            anchor: len,
            window: 0..len,
            fixed_left: true,
            visible_width: 0.0,
            area_width,
            text_size,
            max_length,
            moved: 0,
        };
        edit.clip(None, m);
        edit
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn selection(&self) -> Range<usize> {
        self.anchor.min(self.cursor)..self.anchor.max(self.cursor)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    pub fn is_fixed_left(&self) -> bool {
        self.fixed_left
    }

    pub fn visible_width(&self) -> f32 {
        self.visible_width
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn slice(&self, range: Range<usize>) -> &str {
        &self.value[self.bounds[range.start]..self.bounds[range.end]]
    }

    pub fn visible_text(&self) -> &str {
        self.slice(self.window.clone())
    }

    pub fn selected_text(&self) -> &str {
        self.slice(self.selection())
    }

    fn width(&self, range: Range<usize>, m: &dyn TextMeasure) -> f32 {
        m.text_width(self.slice(range), self.text_size)
    }

    pub fn tick(&mut self) {
        self.moved = self.moved.saturating_add(1);
    }

    pub fn ticks_since_moved(&self) -> u32 {
        self.moved
    }

    /// Caret blink phase: visible for the first half of every `period` ticks.
    pub fn caret_visible(&self, period: u32) -> bool {
        self.moved
            .checked_rem(period)
            .is_none_or(|phase| phase < period / 2)
    }

    /// Replaces the graphemes in `range` with `text` and returns the index
    /// just past the inserted text.
    fn splice(&mut self, range: Range<usize>, text: &str) -> usize {
        let start = self.bounds[range.start];
        let end = self.bounds[range.end];
        self.value.replace_range(start..end, text);
        self.bounds = grapheme_bounds(&self.value);
        match self.bounds.binary_search(&(start + text.len())) {
            Ok(i) | Err(i) => i,
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>, m: &dyn TextMeasure) {
        self.value = value.into();
        self.bounds = grapheme_bounds(&self.value);
        self.cursor = self.len();
        self.anchor = self.cursor;
        self.moved = 0;
        self.clip(None, m);
    }

    pub fn clear(&mut self, m: &dyn TextMeasure) {
        self.set_value(String::new(), m);
    }

    pub fn move_cursor(&mut self, delta: isize, select: bool, m: &dyn TextMeasure) {
        let target = (self.cursor as isize + delta).clamp(0, self.len() as isize);
        self.move_to(target as usize, select, m);
    }

    /// Moves the caret. Without `select` the anchor collapses onto it.
    pub fn move_to(&mut self, pos: usize, select: bool, m: &dyn TextMeasure) {
        let pos = pos.min(self.len());
        if pos != self.cursor {
            self.moved = 0;
        }
        self.cursor = pos;
        self.clip(None, m);
        if !select {
            self.anchor = pos;
        }
    }

    fn is_letter(&self, index: usize) -> bool {
        self.slice(index..index + 1)
            .chars()
            .next()
            .is_some_and(char::is_alphabetic)
    }

    /// Start of the word left of the caret.
    pub fn word_left(&self) -> usize {
        let mut i = self.cursor;
        let mut in_word = false;
        while i > 0 {
            let letter = self.is_letter(i - 1);
            if !in_word {
                in_word = letter;
            } else if !letter {
                return i;
            }
            i -= 1;
        }
        0
    }

    /// Start of the next word right of the caret.
    pub fn word_right(&self) -> usize {
        let len = self.len();
        let mut i = self.cursor;
        let mut in_word = false;
        let mut past_word = false;
        while i < len {
            let letter = self.is_letter(i);
            if !in_word {
                in_word = letter;
            } else if !past_word {
                past_word = !letter;
            } else if letter {
                return i;
            }
            i += 1;
        }
        len
    }

    pub fn select_all(&mut self, m: &dyn TextMeasure) {
        self.anchor = 0;
        self.cursor = self.len();
        self.clip(None, m);
    }

    pub fn remove_selection(&mut self, fix_left: Option<bool>, m: &dyn TextMeasure) {
        let selection = self.selection();
        self.cursor = self.splice(selection, "");
        self.anchor = self.cursor;
        self.clip(fix_left, m);
    }

    /// Types `text` at the caret, replacing the selection. Refused once the
    /// value is at `max_length`.
    pub fn insert(&mut self, text: &str, m: &dyn TextMeasure) -> bool {
        if self.has_selection() {
            self.remove_selection(None, m);
        }
        if self.max_length != 0 && self.len() >= self.max_length {
            return false;
        }
        let at = self.cursor;
        self.cursor = self.splice(at..at, text);
        self.anchor = self.cursor;
        self.clip(Some(true), m);
        true
    }

    pub fn backspace(&mut self, m: &dyn TextMeasure) {
        if self.has_selection() {
            self.remove_selection(Some(false), m);
        } else if self.cursor > 0 {
            let at = self.cursor;
            self.cursor = self.splice(at - 1..at, "");
            self.anchor = self.cursor;
            self.clip(Some(false), m);
        }
    }

    pub fn delete(&mut self, m: &dyn TextMeasure) {
        if self.has_selection() {
            self.remove_selection(Some(true), m);
        } else if self.cursor < self.len() {
            let at = self.cursor;
            self.cursor = self.splice(at..at + 1, "");
            self.anchor = self.cursor;
            self.clip(Some(true), m);
        }
    }

    /// Text a copy would put on the clipboard: the selection, or everything.
    pub fn copy_text(&self) -> String {
        if self.has_selection() {
            self.selected_text().to_string()
        } else {
            self.value.clone()
        }
    }

    pub fn cut(&mut self, m: &dyn TextMeasure) -> String {
        let text = self.copy_text();
        if self.has_selection() {
            self.remove_selection(Some(true), m);
        } else {
            self.clear(m);
            self.clip(Some(true), m);
        }
        text
    }

    /// Splices clipboard text at the caret. Newlines become spaces and the
    /// text is cut to the room left under `max_length`. Returns the number
    /// of graphemes inserted.
    pub fn paste(&mut self, text: &str, m: &dyn TextMeasure) -> usize {
        if self.has_selection() {
            self.remove_selection(None, m);
        }
        let room = match self.max_length {
            0 => usize::MAX,
            max => max.saturating_sub(self.len()),
        };
        let flat = text.replace("\r\n", " ").replace('\n', " ");
        let pasted: Vec<&str> = flat.graphemes(true).take(room).collect();

        let at = self.cursor;
        self.cursor = self.splice(at..at, &pasted.concat());
        self.anchor = self.cursor;
        self.clip(Some(true), m);
        pasted.len()
    }

    /// Recomputes the visible window around the caret.
    ///
    /// `fix_left` forces the anchoring side; `None` keeps the current one.
    /// A caret that left the window re-anchors it at the caret, on the left
    /// when it left forward and on the right when it left backward.
    pub fn clip(&mut self, fix_left: Option<bool>, m: &dyn TextMeasure) {
        if fix_left.is_some() {
            self.moved = 0;
        }
        let len = self.len();
        let end = self.window.end.min(len);
        self.window = self.window.start.min(end)..end;

        let mut left = if self.cursor > self.window.end {
            self.window = self.cursor..self.cursor;
            true
        } else if self.cursor < self.window.start {
            self.window = self.cursor..self.cursor;
            false
        } else {
            fix_left.unwrap_or(self.fixed_left)
        };

        for pass in 0..2 {
            self.grow(left, m);
            if pass == 1 {
                break;
            }
            let Range { start, end } = self.window;
            if self.cursor < start || self.cursor > end {
                self.window = self.cursor..self.cursor;
            } else if !((left && end == len && start != 0) || (!left && start == 0 && end != len)) {
                break;
            }
            left = !left;
        }

        if self.cursor < self.window.start {
            self.window.start = self.cursor;
        } else if self.cursor > self.window.end {
            self.window.end = self.cursor;
        }
        self.fixed_left = left;
        self.visible_width = self.width(self.window.clone(), m);
    }

    fn grow(&mut self, left: bool, m: &dyn TextMeasure) {
        let len = self.len();
        if left {
            let start = self.window.start;
            let mut end = start;
            while end < len && self.width(start..end + 1, m) <= self.area_width {
                end += 1;
            }
            self.window = start..end;
        } else {
            let end = self.window.end;
            let mut start = end;
            while start > 0 && self.width(start - 1..end, m) <= self.area_width {
                start -= 1;
            }
            self.window = start..end;
        }
    }

    /// Horizontal offset of the visible text inside the text area.
    pub fn text_x(&self) -> f32 {
        if self.fixed_left {
            0.0
        } else {
            self.area_width - self.visible_width
        }
    }

    /// Caret index for a pointer `x` relative to the text area.
    ///
    /// Points before or after the visible text map to the window edges; with
    /// `nudge` they reach one grapheme past the edge so that holding a drag
    /// outside the field keeps scrolling it.
    pub fn index_at_x(&self, x: f32, nudge: bool, m: &dyn TextMeasure) -> usize {
        let Range { start, end } = self.window;
        let offset = x - self.text_x();

        if offset < 0.0 {
            if nudge && start > 0 { start - 1 } else { start }
        } else if offset < self.visible_width {
            let mut i = start;
            while i < end && self.width(start..i + 1, m) <= offset {
                i += 1;
            }
            i
        } else if nudge && end < self.len() {
            end + 1
        } else {
            end
        }
    }

    /// Caret x relative to the text area, when the caret is in the window.
    pub fn caret_x(&self, m: &dyn TextMeasure) -> Option<f32> {
        let Range { start, end } = self.window;
        if self.cursor < start || self.cursor > end {
            return None;
        }
        Some(self.text_x() + self.width(start..self.cursor, m))
    }

    /// Visible part of the selection as `(left, right)` x offsets.
    pub fn selection_span(&self, m: &dyn TextMeasure) -> Option<(f32, f32)> {
        let selection = self.selection();
        let Range { start, end } = self.window;
        if selection.is_empty() || selection.start >= end || selection.end <= start {
            return None;
        }
        let from = selection.start.max(start);
        let to = selection.end.min(end);
        let x = self.text_x();
        Some((x + self.width(start..from, m), x + self.width(start..to, m)))
    }
}
