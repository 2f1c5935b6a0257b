use std::sync::Arc;

use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::menu::scroll::{ScrollAnimator, ScrollParams};
use crate::program::core::FrameResult;
use crate::raster::color::Color;
use crate::raster::draw::draw_text;
use crate::raster::font::{Font, text_width};
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;

/// Widest value the value column is laid out for.
const VALUE_TEMPLATE: &str = "999";

/// One row: a short value, a name and the footer description shown while it is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Left column, e.g. minutes until start.
    pub value: String,
    /// Middle column; scrolls when it doesn't fit.
    pub name: String,
    /// Footer text for the active row.
    pub description: String,
}

impl ListItem {
    /// Build a row.
    pub fn new(
        value: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Pixel layout of the list.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Height of each row.
    pub line_height: i32,
    /// Height of the footer description line.
    pub footer_height: i32,
    /// Width reserved for the value column.
    pub value_width: i32,
    /// Width of the chevron column.
    pub chevron_width: i32,
    /// Margin around the screen.
    pub margin: i32,
    /// Gap between the value box and the name.
    pub value_margin: i32,
    /// Text, chevron and footer color.
    pub color: Color,
    /// Name scrolling.
    pub scroll: ScrollParams,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            line_height: 15,
            footer_height: 15,
            value_width: 40,
            chevron_width: 10,
            margin: 3,
            value_margin: 2,
            color: Color::RED,
            scroll: ScrollParams::default(),
        }
    }
}

/// Fonts for the three text roles.
#[derive(Clone, Debug)]
pub struct ListFonts {
    /// Value column.
    pub value: Arc<dyn Font>,
    /// Name column.
    pub name: Arc<dyn Font>,
    /// Footer.
    pub description: Arc<dyn Font>,
}

impl ListFonts {
    /// Same font for every role.
    pub fn uniform(font: Arc<dyn Font>) -> Self {
        Self {
            value: Arc::clone(&font),
            name: Arc::clone(&font),
            description: font,
        }
    }
}

/// Scrollable list of rows with a footer, one active row at a time.
///
/// Only rows that fit the screen are drawn; the active index may point past them, in which case
/// only its footer is shown. The active row's name scrolls when wider than its column.
pub struct ListRenderer {
    config: ListConfig,
    fonts: ListFonts,
    width: i32,
    height: i32,
    capacity: usize,
    name_viewport: i32,
    items: Vec<ListItem>,
    active: usize,
    active_since: f64,
    scroll: ScrollAnimator,
    chevron: Option<Arc<Image>>,
    clock: Arc<ScaledClock>,
    log: LogHandle,
}

impl ListRenderer {
    /// Lay out a list for a `width x height` panel.
    ///
    /// Without a `chevron` image the active-row marker is drawn pixel by pixel.
    pub fn new(
        config: ListConfig,
        fonts: ListFonts,
        width: u32,
        height: u32,
        chevron: Option<Arc<Image>>,
        clock: Arc<ScaledClock>,
        log: LogHandle,
    ) -> Self {
        let width = width as i32;
        let height = height as i32;
        let capacity = row_capacity(&config, height);
        let name_viewport = width
            - config.value_width
            - config.chevron_width
            - 2 * config.margin
            - config.value_margin;
        let active_since = clock.virtual_seconds();
        log.in_scope(|| tracing::debug!(capacity, name_viewport, "list layout"));
        Self {
            scroll: ScrollAnimator::new(config.scroll, capacity),
            config,
            fonts,
            width,
            height,
            capacity,
            name_viewport,
            items: Vec::new(),
            active: 0,
            active_since,
            chevron,
            clock,
            log,
        }
    }

    /// Layout in use.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Number of rows that fit above the footer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width available to a name before it has to scroll.
    pub fn name_viewport_width(&self) -> i32 {
        self.name_viewport
    }

    /// From the left edge to the end of the value column.
    pub fn value_column_width(&self) -> i32 {
        self.config.margin + self.config.value_width + self.config.value_margin
    }

    /// Width of the chevron column.
    pub fn chevron_column_width(&self) -> i32 {
        self.config.chevron_width
    }

    /// Current rows.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Index of the active row.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Virtual time the active row became active.
    pub fn active_since(&self) -> f64 {
        self.active_since
    }

    /// Pixel width of `text` in the name font.
    pub fn name_width(&self, text: &str) -> i32 {
        text_width(self.fonts.name.as_ref(), text)
    }

    /// True when row `index` exists and its name is wider than the name column.
    pub fn needs_scroll(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| self.name_width(&item.name) > self.name_viewport)
    }

    /// Replace the rows.
    ///
    /// Rows whose name changed lose their scroll state. When the active index falls off the end
    /// it goes back to 0 and its dwell restarts.
    pub fn set_items(&mut self, items: Vec<ListItem>) {
        for slot in 0..self.capacity {
            let old = self.items.get(slot).map(|i| i.name.as_str());
            let new = items.get(slot).map(|i| i.name.as_str());
            if old != new {
                self.scroll.reset(slot);
            }
        }
        self.items = items;
        if self.active >= self.items.len() && !self.items.is_empty() {
            self.active = 0;
            self.active_since = self.clock.virtual_seconds();
            self.scroll.reset_all();
        }
    }

    /// Make row `index` active, restarting its dwell and scroll. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            self.log.in_scope(|| {
                tracing::debug!(index, len = self.items.len(), "ignored out-of-range row")
            });
            return false;
        }
        let now = self.clock.virtual_seconds();
        self.active = index;
        self.active_since = now;
        self.scroll.reset_all();
        self.scroll.activate(index, now);
        true
    }

    /// Draw the visible rows and the footer. Never finishes.
    pub fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        let now = self.clock.virtual_seconds();

        for idx in 0..self.items.len().min(self.capacity) {
            self.render_row(surface, idx, now);
        }
        self.render_description(surface);
        FrameResult::running()
    }

    fn render_row(&mut self, surface: &mut Surface, idx: usize, now: f64) {
        let cfg = self.config;
        let is_active = idx == self.active;
        let pixel_offset = idx as i32 * cfg.line_height;
        let name_y = pixel_offset + self.fonts.name.baseline() + cfg.margin;
        let value_y = pixel_offset + self.fonts.value.baseline() + cfg.margin;

        let fixed_value_width = text_width(self.fonts.value.as_ref(), VALUE_TEMPLATE);
        let name_x = cfg.margin + fixed_value_width + cfg.value_margin;
        let name_w = self.name_width(&self.items[idx].name);
        let offset = if is_active && name_w > self.name_viewport {
            self.scroll
                .sample(idx, name_w, self.name_viewport, now, self.active_since)
                .offset
                .round() as i32
        } else {
            0
        };
        draw_text(
            surface,
            self.fonts.name.as_ref(),
            name_x - offset,
            name_y,
            cfg.color,
            &self.items[idx].name,
        );

        let chevron_x = cfg.margin + cfg.value_width + self.name_viewport;
        self.render_chevron(surface, chevron_x, name_y, is_active);
        self.render_value(surface, cfg.margin, value_y, idx);
    }

    fn render_value(&self, surface: &mut Surface, x: i32, y: i32, idx: usize) {
        let font = self.fonts.value.as_ref();
        let text = &self.items[idx].value;
        let w = text_width(font, text);
        let top = y - font.height();
        let bottom = y + self.config.line_height - font.baseline();
        surface.fill_rect(
            0,
            top,
            x + w + self.config.value_margin,
            bottom - top,
            Color::BLACK,
        );
        draw_text(surface, font, x, y, self.config.color, text);
    }

    fn render_chevron(&self, surface: &mut Surface, x: i32, y: i32, is_active: bool) {
        let font = self.fonts.name.as_ref();
        let top = y - font.height();
        let bottom = y + self.config.line_height - font.baseline();
        surface.fill_rect(x, top, self.width - x, bottom - top, Color::BLACK);
        if !is_active {
            return;
        }

        let color = self.config.color;
        if let Some(img) = self.chevron.as_deref() {
            composite_image(
                surface,
                img,
                x + 5,
                y,
                Anchor::LeftMid,
                Some(color),
                BlendMode::Normal,
            );
            return;
        }

        let cx = x + 2;
        for i in 0..4 {
            for j in 0..=i {
                surface.set_pixel(cx + i, y - j, color);
                if !(i == 0 && j == 0) && !(i == 3 && j == 3) {
                    surface.set_pixel(cx + i, y + j, color);
                }
            }
        }
        for j in 0..3 {
            surface.set_pixel(cx + 4, y - j, color);
            surface.set_pixel(cx + 4, y + j, color);
        }
    }

    fn render_description(&self, surface: &mut Surface) {
        let Some(item) = self.items.get(self.active) else {
            return;
        };
        let font = self.fonts.description.as_ref();
        let y = self.height - self.config.footer_height + font.baseline();
        draw_text(
            surface,
            font,
            self.config.margin,
            y,
            self.config.color,
            &item.description,
        );
    }
}

impl std::fmt::Debug for ListRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRenderer")
            .field("capacity", &self.capacity)
            .field("name_viewport", &self.name_viewport)
            .field("items", &self.items.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

fn row_capacity(config: &ListConfig, height: i32) -> usize {
    if config.line_height <= 0 {
        return 0;
    }
    let available = height - config.footer_height - 2 * config.margin;
    (available.max(0) / config.line_height) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/menu/list.rs"]
mod tests;
