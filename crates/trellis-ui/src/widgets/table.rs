use std::rc::Rc;

use trellis_core::{Rect, Renderer, Result, TextAlign, Theme, UiError, Vec2};

use crate::element::{Cx, ElementOptions, ViewCx, Widget};
use crate::event::{CursorState, ScreenChange, UiEvent};
use crate::gesture::ClickCommit;
use crate::scrollbar::{RowList, Scrollbar};
use crate::widgets::fit_text;

pub type RowClickHandler<R> = Rc<dyn Fn(&R, &mut Cx)>;

/// One table column: a header title and how to render a row's cell.
pub struct Column<R> {
    pub title: String,
    /// Fixed width; columns without one share what is left.
    pub width: Option<f32>,
    pub value: Rc<dyn Fn(&R) -> String>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            width: self.width,
            value: self.value.clone(),
        }
    }
}

impl<R> Column<R> {
    pub fn new(title: impl Into<String>, value: impl Fn(&R) -> String + 'static) -> Self {
        Self {
            title: title.into(),
            width: None,
            value: Rc::new(value),
        }
    }

    /// Column showing the same text on every row.
    pub fn constant(title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(title, move |_| text.clone())
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

pub struct TableOptions<R> {
    pub element: ElementOptions,
    /// Total width including the scrollbar, before fixed column widths apply.
    pub width: f32,
    /// Height of the body, excluding the header row.
    pub height: f32,
    pub row_height: f32,
    pub padding: f32,
    /// No scrollbar when zero.
    pub scrollbar_width: f32,
    pub columns: Vec<Column<R>>,
    pub on_click: Option<RowClickHandler<R>>,
}

impl<R> Default for TableOptions<R> {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 800.0,
            height: 300.0,
            row_height: 30.0,
            padding: 5.0,
            scrollbar_width: 0.0,
            columns: Vec::new(),
            on_click: None,
        }
    }
}

impl<R> Clone for TableOptions<R> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            width: self.width,
            height: self.height,
            row_height: self.row_height,
            padding: self.padding,
            scrollbar_width: self.scrollbar_width,
            columns: self.columns.clone(),
            on_click: self.on_click.clone(),
        }
    }
}

impl<R> TableOptions<R> {
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn on_click(mut self, f: impl Fn(&R, &mut Cx) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
}

/// Scrollable list of rows, anchored top-left with the header row above.
pub struct Table<R> {
    width: f32,
    height: f32,
    row_height: f32,
    padding: f32,
    text_size: f32,
    max_rows: usize,
    columns: Vec<Column<R>>,
    widths: Vec<f32>,
    on_click: Option<RowClickHandler<R>>,
    list: RowList<R>,
    scrollbar: Option<Scrollbar>,
    hovered_row: Option<usize>,
    click: ClickCommit<usize>,
}

impl<R: 'static> Table<R> {
    pub fn new(options: TableOptions<R>) -> Result<Self> {
        if options.columns.is_empty() {
            return Err(UiError::TableWithoutColumns);
        }
        if options.row_height <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "table row height must be positive, got {}",
                options.row_height
            )));
        }

        let bar_width = options.scrollbar_width.max(0.0);
        let fixed: f32 = options.columns.iter().filter_map(|c| c.width).sum();
        let shared = options.columns.iter().filter(|c| c.width.is_none()).count();
        let share = if shared > 0 {
            ((options.width - bar_width - fixed) / shared as f32).max(0.0)
        } else {
            0.0
        };
        let widths: Vec<f32> = options
            .columns
            .iter()
            .map(|c| c.width.unwrap_or(share))
            .collect();
        let width = bar_width + widths.iter().sum::<f32>();
        let max_rows = (options.height / options.row_height).floor().max(0.0) as usize;

        let scrollbar = (bar_width > 0.0).then(|| {
            Scrollbar::new(
                Vec2::new(width - bar_width, 0.0),
                options.height,
                max_rows,
                bar_width,
            )
        });

        Ok(Self {
            width,
            height: options.height,
            row_height: options.row_height,
            padding: options.padding,
            text_size: options.row_height - 2.0 * options.padding,
            max_rows,
            columns: options.columns,
            widths,
            on_click: options.on_click,
            list: RowList::default(),
            scrollbar,
            hovered_row: None,
            click: ClickCommit::new(),
        })
    }

    pub fn add_item(&mut self, item: R) {
        self.list.rows.push(item);
        if let Some(bar) = &mut self.scrollbar {
            bar.recompute_thumb(&mut self.list);
        }
    }

    pub fn clear(&mut self) {
        self.list.rows.clear();
        self.list.display_start = 0;
        self.hovered_row = None;
        self.click.cancel();
        if let Some(bar) = &mut self.scrollbar {
            bar.recompute_thumb(&mut self.list);
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.list.rows
    }

    pub fn display_start(&self) -> usize {
        self.list.display_start
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.widths
    }

    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    pub fn scrollbar(&self) -> Option<&Scrollbar> {
        self.scrollbar.as_ref()
    }

    /// Scrolls by whole rows. Does nothing without a scrollbar.
    pub fn scroll_by(&mut self, rows: isize) {
        if let Some(bar) = &mut self.scrollbar {
            bar.scroll_by(&mut self.list, rows);
        }
    }

    fn bar_width(&self) -> f32 {
        self.scrollbar.as_ref().map_or(0.0, Scrollbar::bar_width)
    }

    fn visible_rows(&self) -> std::ops::Range<usize> {
        let start = self.list.display_start;
        start..(start + self.max_rows).min(self.list.rows.len())
    }

    fn over(&self, p: Vec2) -> bool {
        Rect::new(0.0, 0.0, self.width, self.height).contains_strict(p)
    }

    /// Row index under `p`, ignoring the scrollbar strip.
    fn row_at(&self, p: Vec2) -> Option<usize> {
        if p.x < 0.0 || p.x > self.width - self.bar_width() || p.y < 0.0 || p.y > self.height {
            return None;
        }
        let screen_row = (p.y / self.row_height).floor() as usize;
        if screen_row >= self.max_rows {
            return None;
        }
        let row = screen_row + self.list.display_start;
        (row < self.list.rows.len()).then_some(row)
    }

    /// Text anchor of column `i` starting at `x`: the first column is
    /// left aligned, the rest centred.
    fn cell_anchor(&self, i: usize, x: f32) -> (f32, TextAlign) {
        if i == 0 {
            (x + self.padding, TextAlign::Left)
        } else {
            (x + self.widths[i] * 0.5, TextAlign::Center)
        }
    }

    fn cells(&self, r: &mut dyn Renderer, cx: &ViewCx, y: f32, text: impl Fn(&Column<R>) -> String) {
        let mut x = 0.0;
        for (i, column) in self.columns.iter().enumerate() {
            let width = self.widths[i];
            let (tx, align) = self.cell_anchor(i, x);
            let value = text(column);
            let shown = fit_text(&value, width - 2.0 * self.padding, self.text_size, cx.measure());
            r.text(&shown, Vec2::new(tx, y), self.text_size, align);
            x += width;
        }
    }
}

impl<R: 'static> Widget for Table<R> {
    fn kind(&self) -> &'static str {
        "table"
    }

    fn update(&mut self, cx: &mut Cx) {
        let mouse = cx.mouse();
        if let Some(bar) = &mut self.scrollbar {
            bar.update(&mut self.list, mouse);
        }

        if self.on_click.is_none() {
            return;
        }
        let row = self.row_at(mouse);
        if row.is_some() && row != self.hovered_row {
            cx.play("hover");
        }
        self.hovered_row = row;
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        let mouse = cx.mouse();
        match event {
            UiEvent::Wheel(delta) => {
                let over = self.over(mouse);
                if let Some(bar) = &mut self.scrollbar {
                    bar.wheel(&mut self.list, delta.y, over);
                }
            }
            _ if event.is_primary_down() => {
                if let Some(bar) = &mut self.scrollbar {
                    bar.pointer_down(&self.list, mouse);
                }
                if self.on_click.is_some() {
                    self.click.press(self.row_at(mouse));
                }
            }
            _ if event.is_primary_up() => {
                if let Some(bar) = &mut self.scrollbar {
                    bar.pointer_up();
                }
                let Some(row) = self.click.release(self.row_at(mouse)) else {
                    return;
                };
                if let (Some(on_click), Some(item)) = (self.on_click.clone(), self.list.rows.get(row)) {
                    on_click(item, cx);
                    cx.play("click");
                }
            }
            _ => {}
        }
    }

    fn change_screen(&mut self, change: &ScreenChange, _cx: &mut Cx) {
        if change.leaving {
            self.hovered_row = None;
            self.click.cancel();
            if let Some(bar) = &mut self.scrollbar {
                bar.cancel_drag();
            }
        }
    }

    fn cursor_state(&self, _cx: &ViewCx) -> Option<CursorState> {
        self.hovered_row.map(|_| CursorState::Pointer)
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
        let rh = self.row_height;
        let ts = self.text_size;
        r.no_stroke();

        if let Some(header) = style.colour_in("fill", "header") {
            r.fill(header);
            r.rect(Rect::new(0.0, -rh, self.width, rh));
        }
        r.fill_opt(style.colour_in("text", "header"));
        self.cells(r, cx, -rh * 0.5 + ts / 3.0, |c| c.title.clone());

        let fill = style.colour("fill");
        if let Some(fill) = fill {
            r.fill(fill);
            r.rect(Rect::new(0.0, 0.0, self.width, self.height));
        }

        let inner = self.width - self.bar_width();
        let start = self.list.display_start;
        if let Some(alternate) = style.colour_in("fill", "alternate")
            && Some(alternate) != fill
        {
            r.fill(alternate);
            let first = 1 - start % 2;
            for i in (first..self.max_rows).step_by(2) {
                r.rect(Rect::new(0.0, i as f32 * rh, inner, rh));
            }
        }

        let visible = self.visible_rows();
        if let Some(hovered) = self.hovered_row.filter(|row| visible.contains(row))
            && let Some(colour) = style.colour_only_in("fill", "hover")
        {
            r.fill(colour);
            r.rect(Rect::new(0.0, (hovered - start) as f32 * rh, inner, rh));
        }

        let text = style.colour("text");
        let alternate_text = style.colour_only_in("text", "alternate");
        let hover_text = style.colour_only_in("text", "hover");
        for (screen_row, i) in visible.enumerate() {
            let colour = if Some(i) == self.hovered_row && hover_text.is_some() {
                hover_text
            } else if i % 2 == 1 && alternate_text.is_some() {
                alternate_text
            } else {
                text
            };
            r.fill_opt(colour);
            let row = &self.list.rows[i];
            let y = screen_row as f32 * rh + rh * 0.5 + ts / 3.0;
            self.cells(r, cx, y, |c| (c.value)(row));
        }

        if let Some(bar) = &self.scrollbar {
            bar.show(r);
        }
    }

    fn post_show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let Some(stroke) = cx.style().colour("stroke") else {
            return;
        };
        r.no_fill();
        r.stroke(stroke, 1.0);
        r.rect(Rect::new(
            0.0,
            -self.row_height,
            self.width,
            self.height + self.row_height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> TableOptions<String> {
        TableOptions::default().column(Column::new("Name", |s: &String| s.clone()))
    }

    #[test]
    fn test_table_without_columns_is_rejected() {
        let result = Table::<String>::new(TableOptions::default());
        assert!(matches!(result, Err(UiError::TableWithoutColumns)));
    }

    #[test]
    fn test_column_widths_share_remaining_space() {
        let table = Table::new(TableOptions {
            width: 500.0,
            scrollbar_width: 20.0,
            ..names()
                .column(Column::constant("Kind", "x").width(180.0))
                .column(Column::constant("Size", "1"))
        })
        .unwrap();
        assert_eq!(table.column_widths(), &[150.0, 180.0, 150.0]);
        assert_eq!(table.width(), 500.0);
    }

    #[test]
    fn test_row_at_skips_scrollbar_and_empty_rows() {
        let mut table = Table::new(TableOptions {
            width: 200.0,
            height: 90.0,
            scrollbar_width: 10.0,
            ..names()
        })
        .unwrap();
        for i in 0..5 {
            table.add_item(format!("row {i}"));
        }
        assert_eq!(table.max_rows(), 3);
        assert_eq!(table.row_at(Vec2::new(50.0, 45.0)), Some(1));
        assert_eq!(table.row_at(Vec2::new(195.0, 45.0)), None);

        table.scroll_by(2);
        assert_eq!(table.display_start(), 2);
        assert_eq!(table.row_at(Vec2::new(50.0, 75.0)), Some(4));

        table.clear();
        assert_eq!(table.display_start(), 0);
        assert_eq!(table.row_at(Vec2::new(50.0, 15.0)), None);
    }
}
