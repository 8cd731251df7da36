use serde::Deserialize;

use crate::Size;
use crate::error::{Result, UiError};

/// UI-wide settings.
///
/// `width`/`height` describe the virtual canvas, not pixels: every element
/// is positioned in these units and the whole canvas is scaled into the
/// window on resize.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub width: f32,
    pub height: f32,
    /// Maximum share of the window the canvas may take on its limiting axis.
    pub buffer: f32,
    pub overlay_header: f32,
    pub overlay_padding: f32,
    pub tooltip_height: f32,
    pub tooltip_padding: f32,
    /// Idle ticks before a tooltip is revealed.
    pub tooltip_delay: u32,
    /// Caret blink period in ticks (visible for the first half).
    pub caret_blink: u32,
    /// While drag-selecting past a text box edge, the window moves one
    /// character every this many ticks.
    pub drag_scroll_interval: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            buffer: 0.9,
            overlay_header: 30.0,
            overlay_padding: 5.0,
            tooltip_height: 25.0,
            tooltip_padding: 5.0,
            tooltip_delay: 30,
            caret_blink: 60,
            drag_scroll_interval: 5,
        }
    }
}

impl UiConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: UiConfig =
            serde_json::from_str(json).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "canvas must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.buffer > 0.0 && self.buffer <= 1.0) {
            return Err(UiError::InvalidConfig(format!(
                "buffer must be in (0, 1], got {}",
                self.buffer
            )));
        }
        if self.caret_blink == 0 || self.drag_scroll_interval == 0 {
            return Err(UiError::InvalidConfig(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn tooltip_text_size(&self) -> f32 {
        self.tooltip_height - 2.0 * self.tooltip_padding
    }

    pub fn overlay_text_size(&self) -> f32 {
        self.overlay_header - 2.0 * self.overlay_padding
    }
}
