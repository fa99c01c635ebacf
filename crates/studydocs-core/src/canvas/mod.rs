// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The drawing surface builders paint on.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! is positioned by its baseline. A [`Canvas`] records draw commands per
//! page; [`Canvas::finish`] freezes them into a [`Document`] for the writer.

pub mod metrics;

use crate::canvas::metrics::FontWeight;
use crate::canvas::metrics::text_width;
use crate::canvas::metrics::wrap_text;

/// A4 portrait.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// First usable Y on a page, below the header band.
pub const CONTENT_TOP: f32 = 45.0;
/// Content must end above this Y.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Points.
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color,
            align: Align::Left,
        }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }

    pub fn align(self, align: Align) -> Self {
        Self { align, ..self }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FilledRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        fill: Color,
        border: Option<Color>,
    },
    /// `x` is the resolved left edge; alignment has already been applied.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
    },
}

/// One page: its size plus the commands drawn on it, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    size: PageSize,
    commands: Vec<DrawCommand>,
}

impl Page {
    fn new(size: PageSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The text runs on this page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }
}

/// A finished, read-only sequence of pages.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run in the document, page by page.
    pub fn texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.pages.iter().any(|p| p.contains_text(needle))
    }
}

pub struct Canvas {
    size: PageSize,
    pages: Vec<Page>,
    current: usize,
}

impl Canvas {
    /// A canvas with one empty page.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            pages: vec![Page::new(size)],
            current: 0,
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Zero-based index of the page being drawn on.
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Append a page, make it current, and return the top-of-content Y.
    pub fn new_page(&mut self) -> f32 {
        self.pages.push(Page::new(self.size));
        self.current = self.pages.len() - 1;
        CONTENT_TOP
    }

    /// Make an existing page current. Out-of-range indices are clamped to
    /// the last page.
    pub fn set_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
    }

    fn push(&mut self, command: DrawCommand) {
        self.pages[self.current].commands.push(command);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.push(DrawCommand::FilledRect { x, y, w, h, color });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        fill: Color,
        border: Option<Color>,
    ) {
        let radius = radius.clamp(0.0, w.min(h) / 2.0);
        self.push(DrawCommand::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            fill,
            border,
        });
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let width = text_width(text, style.size, style.weight);
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x: left,
            y,
            size: style.size,
            weight: style.weight,
            color: style.color,
        });
    }

    /// Lines `text` would occupy at `max_width`. Draws nothing.
    pub fn wrap_text(&self, text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
        wrap_text(text, max_width, size, weight)
    }

    pub fn finish(self) -> Document {
        Document { pages: self.pages }
    }
}
