//! Pointer tracking, cursor image switching and tooltip timing.

use std::collections::HashMap;

use trellis_core::{CursorHost, Size, Vec2, ViewTransform};

use crate::event::CursorState;

const OFF_CANVAS_CURSOR: &str = "default";

#[derive(Debug)]
pub struct CursorController {
    window_pos: Vec2,
    mouse: Vec2,
    buttons_down: u8,
    on_canvas: bool,
    mode: CursorState,
    image: String,
    idle_ticks: u32,
    tooltip_armed: bool,
    images: HashMap<String, String>,
}

impl Default for CursorController {
    fn default() -> Self {
        Self {
            window_pos: Vec2::ZERO,
            mouse: Vec2::ZERO,
            buttons_down: 0,
            on_canvas: false,
            mode: CursorState::Default,
            image: OFF_CANVAS_CURSOR.to_string(),
            idle_ticks: 0,
            tooltip_armed: false,
            images: HashMap::new(),
        }
    }
}

impl CursorController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps cursor state names to host cursor images. Unmapped states use
    /// their own name as the image.
    pub fn set_images(&mut self, images: HashMap<String, String>) {
        self.images = images;
    }

    pub fn pointer_moved(&mut self, window_pos: Vec2) {
        self.window_pos = window_pos;
    }

    pub fn button_pressed(&mut self) {
        self.buttons_down = self.buttons_down.saturating_add(1);
    }

    pub fn button_released(&mut self) {
        self.buttons_down = self.buttons_down.saturating_sub(1);
    }

    /// Pointer in window space.
    pub fn window_pos(&self) -> Vec2 {
        self.window_pos
    }

    /// Pointer in canvas space, as of the last update.
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn on_canvas(&self) -> bool {
        self.on_canvas
    }

    pub fn mode(&self) -> &CursorState {
        &self.mode
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn tooltip_ready(&self, delay: u32) -> bool {
        self.idle_ticks > delay
    }

    /// Any click or key press hides the tooltip until the pointer moves again.
    pub fn hide_tooltip(&mut self) {
        self.tooltip_armed = false;
        self.idle_ticks = 0;
    }

    pub fn update(&mut self, view: &ViewTransform, window: Size, host: &mut dyn CursorHost) {
        let mouse = view.to_canvas(self.window_pos);
        if self.buttons_down == 0 && mouse == self.mouse {
            if self.tooltip_armed {
                self.idle_ticks = self.idle_ticks.saturating_add(1);
            } else {
                self.idle_ticks = 0;
            }
        } else {
            self.idle_ticks = 0;
            self.tooltip_armed = true;
        }
        self.mouse = mouse;

        let on_canvas = view.covers(window, self.window_pos);
        if on_canvas != self.on_canvas {
            self.on_canvas = on_canvas;
            host.set_cursor(if on_canvas { &self.image } else { OFF_CANVAS_CURSOR });
        }
    }

    /// Applies the cursor state resolved from the active screen. The host
    /// is only told when the state actually changes.
    pub fn set_mode(&mut self, state: Option<CursorState>, host: &mut dyn CursorHost) {
        let state = state.unwrap_or_default();
        if state == self.mode {
            return;
        }
        self.image = self
            .images
            .get(state.name())
            .cloned()
            .unwrap_or_else(|| state.name().to_string());
        self.mode = state;
        if self.on_canvas {
            host.set_cursor(&self.image);
        }
    }
}
