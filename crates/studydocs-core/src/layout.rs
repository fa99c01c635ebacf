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

//! Reusable blocks shared by both document builders.

use crate::canvas::Align;
use crate::canvas::CONTENT_WIDTH;
use crate::canvas::Canvas;
use crate::canvas::Color;
use crate::canvas::MARGIN;
use crate::canvas::TextStyle;
use crate::canvas::metrics::FontWeight;

pub const PRIMARY: Color = Color::rgb(59, 130, 246);
pub const ACCENT: Color = Color::rgb(16, 185, 129);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const TEXT_DARK: Color = Color::rgb(30, 41, 59);
pub const TEXT_MUTED: Color = Color::rgb(100, 116, 139);
pub const SURFACE: Color = Color::rgb(248, 250, 252);
pub const SURFACE_ALT: Color = Color::rgb(241, 245, 249);
pub const BORDER: Color = Color::rgb(203, 213, 225);

pub const HEADER_HEIGHT: f32 = 30.0;
pub const SECTION_HEADER_ADVANCE: f32 = 20.0;
pub const FOOTER_Y: f32 = 287.0;

const SECTION_BAND_HEIGHT: f32 = 12.0;

/// Card geometry: the text column starts right of the badge.
const CARD_PADDING: f32 = 5.0;
const CARD_TEXT_X: f32 = MARGIN + 20.0;
const CARD_TEXT_WIDTH: f32 = CONTENT_WIDTH - 25.0;
const CARD_BODY_SIZE: f32 = 10.0;
const CARD_LINE_HEIGHT: f32 = 5.0;
const BADGE_SIZE: f32 = 10.0;

/// Full-width colored band with the title on the left and the page number on
/// the right.
pub fn page_header(canvas: &mut Canvas, page_number: usize, page_count: usize, title: &str) {
    let width = canvas.size().width;
    canvas.fill_rect(0.0, 0.0, width, HEADER_HEIGHT, PRIMARY);
    canvas.text(title, MARGIN, 19.0, TextStyle::new(20.0, WHITE).bold());
    canvas.text(
        &format!("Page {page_number} of {page_count}"),
        width - MARGIN,
        19.0,
        TextStyle::new(10.0, WHITE).align(Align::Right),
    );
}

/// Glyphs drawn in front of section titles. All of them exist in
/// WinAnsiEncoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionIcon {
    Statistics,
    Topics,
    Activity,
}

impl SectionIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            SectionIcon::Statistics => "#",
            SectionIcon::Topics => "\u{2022}",
            SectionIcon::Activity => "\u{00BB}",
        }
    }
}

/// Light band with a bold label. Returns the Y for the section body.
pub fn section_header(canvas: &mut Canvas, title: &str, icon: SectionIcon, y: f32) -> f32 {
    canvas.fill_rect(MARGIN, y, CONTENT_WIDTH, SECTION_BAND_HEIGHT, SURFACE_ALT);
    canvas.text(icon.glyph(), MARGIN + 4.0, y + 8.0, TextStyle::new(12.0, PRIMARY).bold());
    canvas.text(title, MARGIN + 12.0, y + 8.0, TextStyle::new(13.0, TEXT_DARK).bold());
    y + SECTION_HEADER_ADVANCE
}

/// Bordered box with a large centered value and a one- or two-line label.
pub fn stat_box(canvas: &mut Canvas, label: &str, value: &str, x: f32, y: f32, w: f32, h: f32) {
    canvas.rounded_rect(x, y, w, h, 2.0, WHITE, Some(BORDER));
    let center = x + w / 2.0;
    canvas.text(
        value,
        center,
        y + 10.0,
        TextStyle::new(16.0, PRIMARY).bold().align(Align::Center),
    );
    let style = TextStyle::new(8.0, TEXT_MUTED).align(Align::Center);
    for (i, line) in label.split('\n').take(2).enumerate() {
        canvas.text(line, center, y + 16.0 + i as f32 * 4.0, style);
    }
}

/// Height the question and answer text of a card needs, including the
/// labels and top padding. May exceed the fixed block height.
pub fn card_content_height(canvas: &Canvas, question: &str, answer: &str) -> f32 {
    let (q, a) = card_lines(canvas, question, answer);
    card_answer_offset(q.len()) + 6.0 + a.len() as f32 * CARD_LINE_HEIGHT
}

fn card_lines(canvas: &Canvas, question: &str, answer: &str) -> (Vec<String>, Vec<String>) {
    let q = canvas.wrap_text(question, CARD_TEXT_WIDTH, CARD_BODY_SIZE, FontWeight::Normal);
    let a = canvas.wrap_text(answer, CARD_TEXT_WIDTH, CARD_BODY_SIZE, FontWeight::Normal);
    (q, a)
}

/// Offset of the "Answer:" label from the top of the block.
fn card_answer_offset(question_lines: usize) -> f32 {
    16.0 + question_lines as f32 * CARD_LINE_HEIGHT + 4.0
}

/// A numbered question/answer block of fixed height. Text that needs more
/// room than `max_height` is still drawn in full and runs past the border.
/// Returns the height consumed, which is always `max_height`.
pub fn card_block(
    canvas: &mut Canvas,
    index: usize,
    question: &str,
    answer: &str,
    y: f32,
    max_height: f32,
) -> f32 {
    canvas.rounded_rect(MARGIN, y, CONTENT_WIDTH, max_height, 3.0, SURFACE, Some(BORDER));

    let badge_x = MARGIN + CARD_PADDING;
    let badge_y = y + CARD_PADDING;
    canvas.rounded_rect(badge_x, badge_y, BADGE_SIZE, BADGE_SIZE, BADGE_SIZE / 2.0, PRIMARY, None);
    canvas.text(
        &index.to_string(),
        badge_x + BADGE_SIZE / 2.0,
        badge_y + 6.5,
        TextStyle::new(9.0, WHITE).bold().align(Align::Center),
    );

    let (question_lines, answer_lines) = card_lines(canvas, question, answer);
    let body = TextStyle::new(CARD_BODY_SIZE, TEXT_DARK);

    canvas.text("Question:", CARD_TEXT_X, y + 10.0, TextStyle::new(11.0, PRIMARY).bold());
    for (i, line) in question_lines.iter().enumerate() {
        canvas.text(line, CARD_TEXT_X, y + 16.0 + i as f32 * CARD_LINE_HEIGHT, body);
    }

    let answer_y = y + card_answer_offset(question_lines.len());
    canvas.text("Answer:", CARD_TEXT_X, answer_y, TextStyle::new(11.0, ACCENT).bold());
    for (i, line) in answer_lines.iter().enumerate() {
        canvas.text(line, CARD_TEXT_X, answer_y + 6.0 + i as f32 * CARD_LINE_HEIGHT, body);
    }

    max_height
}

/// Small print at the bottom of the current page: a label on the left and
/// a note on the right.
pub fn footer(canvas: &mut Canvas, label: &str, note: &str) {
    let width = canvas.size().width;
    let style = TextStyle::new(8.0, TEXT_MUTED);
    canvas.text(label, MARGIN, FOOTER_Y, style);
    canvas.text(note, width - MARGIN, FOOTER_Y, style.align(Align::Right));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PageSize;

    #[test]
    fn test_page_header_text() {
        let mut canvas = Canvas::new(PageSize::A4);
        page_header(&mut canvas, 2, 5, "Flashcards");
        let doc = canvas.finish();
        assert_eq!(doc.pages()[0].texts(), vec!["Flashcards", "Page 2 of 5"]);
    }

    #[test]
    fn test_section_header_advances_by_fixed_amount() {
        let mut canvas = Canvas::new(PageSize::A4);
        assert_eq!(section_header(&mut canvas, "Topics", SectionIcon::Topics, 73.0), 93.0);
    }

    #[test]
    fn test_stat_box_two_line_label() {
        let mut canvas = Canvas::new(PageSize::A4);
        stat_box(&mut canvas, "Quizzes\nTaken", "5", MARGIN, 60.0, 50.0, 25.0);
        let doc = canvas.finish();
        assert_eq!(doc.pages()[0].texts(), vec!["5", "Quizzes", "Taken"]);
    }

    #[test]
    fn test_card_block_draws_labels_and_text() {
        let mut canvas = Canvas::new(PageSize::A4);
        let consumed = card_block(&mut canvas, 3, "What is 2+2?", "4", 65.0, 70.0);
        assert_eq!(consumed, 70.0);
        let doc = canvas.finish();
        assert_eq!(
            doc.pages()[0].texts(),
            vec!["3", "Question:", "What is 2+2?", "Answer:", "4"]
        );
    }

    /// Overlong answers overflow the fixed block instead of growing it.
    #[test]
    fn test_card_block_overflow_is_accepted() {
        let mut canvas = Canvas::new(PageSize::A4);
        let answer = "This answer goes on and on. ".repeat(40);
        assert!(card_content_height(&canvas, "Q", &answer) > 70.0);
        let consumed = card_block(&mut canvas, 1, "Q", &answer, 65.0, 70.0);
        assert_eq!(consumed, 70.0);
        let doc = canvas.finish();
        let drawn: String = doc.pages()[0].texts()[4..].join(" ");
        assert_eq!(drawn, answer.trim_end());
    }

    #[test]
    fn test_footer() {
        let mut canvas = Canvas::new(PageSize::A4);
        footer(&mut canvas, "Generated by Study Assistant", "10/19/2026");
        let doc = canvas.finish();
        assert_eq!(
            doc.pages()[0].texts(),
            vec!["Generated by Study Assistant", "10/19/2026"]
        );
    }
}
