use trellis_core::{Rect, Renderer, TextAlign, TextMeasure, Theme, Vec2};
use unicode_segmentation::UnicodeSegmentation;

use crate::element::{Cx, ElementOptions, ViewCx, Widget};
use crate::event::{ScreenChange, UiEvent};
use crate::scrollbar::{RowList, Scrollbar};

#[derive(Clone)]
pub struct ChatBoxOptions {
    pub element: ElementOptions,
    /// Total width including the scrollbar.
    pub width: f32,
    pub height: f32,
    pub line_height: f32,
    pub padding: f32,
    /// No scrollbar when zero.
    pub scrollbar_width: f32,
}

impl Default for ChatBoxOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 400.0,
            height: 250.0,
            line_height: 25.0,
            padding: 5.0,
            scrollbar_width: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLine {
    pub text: String,
    pub bold: bool,
}

/// Message log anchored at its bottom-left corner. The newest line sits at
/// the bottom and older lines stack upward.
pub struct ChatBox {
    width: f32,
    height: f32,
    line_height: f32,
    padding: f32,
    text_size: f32,
    max_lines: usize,
    /// Newest first.
    lines: RowList<ChatLine>,
    scrollbar: Option<Scrollbar>,
}

impl ChatBox {
    pub fn new(options: &ChatBoxOptions) -> Self {
        let bar_width = options.scrollbar_width.max(0.0);
        let max_lines = if options.line_height > 0.0 {
            (options.height / options.line_height).floor().max(0.0) as usize
        } else {
            0
        };
        let scrollbar = (bar_width > 0.0).then(|| {
            Scrollbar::new(
                Vec2::new(options.width - bar_width, 0.0),
                options.height,
                max_lines,
                bar_width,
            )
            .reversed()
        });
        Self {
            width: options.width - bar_width,
            height: options.height,
            line_height: options.line_height,
            padding: options.padding,
            text_size: options.line_height - 2.0 * options.padding,
            max_lines,
            lines: RowList::default(),
            scrollbar,
        }
    }

    /// Wraps `text` to the line width and adds it below everything else,
    /// scrolling back to the newest line.
    pub fn add_text(&mut self, text: &str, bold: bool, m: &dyn TextMeasure) {
        let wrapped = wrap_text(text, self.text_size, self.width - 2.0 * self.padding, m);
        for line in wrapped {
            self.lines.rows.insert(0, ChatLine { text: line, bold });
        }
        match &mut self.scrollbar {
            Some(bar) => bar.reset(&mut self.lines),
            None => self.lines.display_start = 0,
        }
    }

    pub fn clear(&mut self) {
        self.lines.rows.clear();
        self.lines.display_start = 0;
        if let Some(bar) = &mut self.scrollbar {
            bar.recompute_thumb(&mut self.lines);
        }
    }

    pub fn toggle_scrollbar(&mut self, hidden: bool) {
        let Some(bar) = &mut self.scrollbar else {
            return;
        };
        self.lines.display_start = 0;
        bar.set_hidden(&mut self.lines, hidden);
    }

    /// Lines, newest first.
    pub fn lines(&self) -> &[ChatLine] {
        &self.lines.rows
    }

    pub fn display_start(&self) -> usize {
        self.lines.display_start
    }

    pub fn scrollbar(&self) -> Option<&Scrollbar> {
        self.scrollbar.as_ref()
    }

    pub fn scroll_by(&mut self, lines: isize) {
        if let Some(bar) = &mut self.scrollbar {
            bar.scroll_by(&mut self.lines, lines);
        }
    }

    fn over(&self, p: Vec2) -> bool {
        let bar = self.scrollbar.as_ref().map_or(0.0, Scrollbar::bar_width);
        Rect::new(0.0, -self.height, self.width + bar, self.height).contains_strict(p)
    }
}

impl Widget for ChatBox {
    fn kind(&self) -> &'static str {
        "chatbox"
    }

    fn update(&mut self, cx: &mut Cx) {
        if let Some(bar) = &mut self.scrollbar {
            bar.update(&mut self.lines, cx.mouse());
        }
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        let mouse = cx.mouse();
        let over = self.over(mouse);
        let Some(bar) = &mut self.scrollbar else {
            return;
        };
        match event {
            UiEvent::Wheel(delta) => bar.wheel(&mut self.lines, delta.y, over),
            _ if event.is_primary_down() => {
                bar.pointer_down(&self.lines, mouse);
            }
            _ if event.is_primary_up() => bar.pointer_up(),
            _ => {}
        }
    }

    fn change_screen(&mut self, change: &ScreenChange, _cx: &mut Cx) {
        if change.leaving
            && let Some(bar) = &mut self.scrollbar
        {
            bar.cancel_drag();
        }
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.over(cx.mouse())
    }

    fn restyle(&mut self, theme: Option<&Theme>, style_name: &str) {
        if let Some(bar) = &mut self.scrollbar {
            bar.restyle(theme, style_name);
        }
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        let lh = self.line_height;
        let ts = self.text_size;
        let start = self.lines.display_start;
        let end = (start + self.max_lines).min(self.lines.rows.len());

        for (row, line) in self.lines.rows[start..end].iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let bottom = -lh * row as f32;
            let fill = style.colour_if("fill", "bold", line.bold);
            let stroke = style.colour_if("stroke", "bold", line.bold);
            if fill.is_some() || stroke.is_some() {
                r.fill_opt(fill);
                r.stroke_opt(stroke, 1.0);
                let width = cx.measure().text_width(&line.text, ts) + 2.0 * self.padding;
                r.rect(Rect::new(0.0, bottom - lh, width, lh));
            }

            r.no_stroke();
            r.fill_opt(style.colour_if("text", "bold", line.bold));
            r.text(
                &line.text,
                Vec2::new(self.padding, bottom - lh * 0.5 + ts / 3.0),
                ts,
                TextAlign::Left,
            );
        }

        if let Some(bar) = &self.scrollbar {
            bar.show(r);
        }
    }
}

/// Greedy word wrap. Words wider than a line are split across lines.
/// Always yields at least one line, which may be empty.
pub fn wrap_text(text: &str, size: f32, max_width: f32, m: &dyn TextMeasure) -> Vec<String> {
    let mut words: Vec<String> = text.split(' ').rev().map(str::to_string).collect();
    let mut lines = Vec::new();
    let mut line = String::new();

    while let Some(word) = words.pop() {
        let mut candidate = format!("{line}{word}");
        if !words.is_empty() {
            candidate.push(' ');
        }
        if m.text_width(&candidate, size) <= max_width {
            line = candidate;
        } else if line.is_empty() {
            let (head, tail) = split_word(&word, size, max_width, m);
            lines.push(head.to_string());
            if !tail.is_empty() {
                words.push(tail.to_string());
            }
        } else {
            lines.push(std::mem::take(&mut line));
            words.push(word);
        }
    }
    lines.push(line);
    lines
}

/// Longest prefix of `word` that fits, and the rest. The prefix always
/// holds at least one grapheme so wrapping makes progress.
fn split_word<'a>(word: &'a str, size: f32, max_width: f32, m: &dyn TextMeasure) -> (&'a str, &'a str) {
    if m.text_width(word, size) <= max_width {
        return (word, "");
    }
    let mut end = 0;
    for (i, g) in word.grapheme_indices(true) {
        let next = i + g.len();
        if end > 0 && m.text_width(&word[..next], size) > max_width {
            break;
        }
        end = next;
    }
    word.split_at(end)
}
