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

//! Advance widths for the two base-14 fonts the writer uses, and word wrap
//! built on them.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Width used for characters outside the tables.
const DEFAULT_WIDTH: u16 = 556;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    /// The PDF base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            FontWeight::Normal => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
        }
    }
}

/// Helvetica widths for U+0020 through U+007E, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for U+0020 through U+007E, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_units(ch: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|ch| char_units(ch, weight) as u32).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
}

/// Break `text` into lines no wider than `max_width` millimetres.
///
/// Explicit line breaks are kept. Words wider than a whole line are split
/// between characters. Empty text yields a single empty line.
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();
    let space = text_width(" ", size, weight);
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;
        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, size, weight);
            if !current.is_empty() {
                if current_width + space + word_width <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space + word_width;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
            }
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                for piece in split_word(word, max_width, size, weight) {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current_width = text_width(&piece, size, weight);
                    current = piece;
                }
            }
        }
        lines.push(current);
    }
    lines
}

/// Split a single overlong word into pieces that each fit `max_width`.
/// Every piece holds at least one character.
fn split_word(word: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let w = char_units(ch, weight) as f32 / 1000.0 * size * MM_PER_PT;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Fit `text` on one line of `max_width`, ending it with `...` when cut.
pub fn fit_line(text: &str, max_width: f32, size: f32, weight: FontWeight) -> String {
    if text_width(text, size, weight) <= max_width {
        return text.to_string();
    }
    let ellipsis = "...";
    let budget = max_width - text_width(ellipsis, size, weight);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let w = char_units(ch, weight) as f32 / 1000.0 * size * MM_PER_PT;
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    format!("{}{ellipsis}", out.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222 units at 10pt.
        let expected = 944.0 / 1000.0 * 10.0 * MM_PER_PT;
        assert!((text_width("Hi", 10.0, FontWeight::Normal) - expected).abs() < 1e-4);
        assert!(text_width("Hi", 10.0, FontWeight::Bold) > text_width("Hi", 10.0, FontWeight::Normal));
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(wrap_text("", 50.0, 10.0, FontWeight::Normal), vec![String::new()]);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("What is a cell?", 100.0, 10.0, FontWeight::Normal);
        assert_eq!(lines, vec!["What is a cell?".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "The mitochondria is the powerhouse of the cell and produces most of its energy";
        let lines = wrap_text(text, 40.0, 10.0, FontWeight::Normal);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Normal) <= 40.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = wrap_text("first\nsecond", 100.0, 10.0, FontWeight::Normal);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, 30.0, 10.0, FontWeight::Normal);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Normal) <= 30.0);
        }
    }

    #[test]
    fn test_fit_line() {
        assert_eq!(fit_line("short", 100.0, 10.0, FontWeight::Normal), "short");
        let cut = fit_line(&"word ".repeat(50), 40.0, 10.0, FontWeight::Normal);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, 10.0, FontWeight::Normal) <= 40.0);
    }
}
