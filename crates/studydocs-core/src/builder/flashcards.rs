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

//! Flashcard sets, two fixed-height cards at a time.
//!
//! Every header reads "Page N of M", so the page count is worked out in a
//! dry run before anything is drawn. The dry run and the render pass share
//! [`overflows`], which keeps the two counts identical.

use crate::canvas::CONTENT_BOTTOM;
use crate::canvas::CONTENT_TOP;
use crate::canvas::Canvas;
use crate::canvas::Document;
use crate::canvas::MARGIN;
use crate::canvas::PageSize;
use crate::canvas::TextStyle;
use crate::config::ExportConfig;
use crate::layout::TEXT_DARK;
use crate::layout::TEXT_MUTED;
use crate::layout::card_block;
use crate::layout::footer;
use crate::layout::page_header;
use crate::types::flashcard::FlashcardSet;
use crate::types::timestamp::Timestamp;

pub const CARD_HEIGHT: f32 = 70.0;
pub const CARD_GAP: f32 = 15.0;
/// Where the first card goes on page one, below the metadata lines.
pub const FIRST_CARD_Y: f32 = 65.0;

fn overflows(y: f32) -> bool {
    y + CARD_HEIGHT > CONTENT_BOTTOM
}

/// Number of pages a set of `card_count` cards will span. Always at least 1.
pub fn count_pages(card_count: usize) -> usize {
    let mut pages = 1;
    let mut y = FIRST_CARD_Y;
    for _ in 0..card_count {
        if overflows(y) {
            pages += 1;
            y = CONTENT_TOP;
        }
        y += CARD_HEIGHT + CARD_GAP;
    }
    pages
}

pub fn build_flashcards(
    set: &FlashcardSet,
    generated_at: Timestamp,
    config: &ExportConfig,
) -> Document {
    let total_pages = count_pages(set.flashcards.len());
    let title = format!("{} Flashcards", config.app_name);
    let today = generated_at.date();
    log::debug!(
        "Laying out {} flashcards on {total_pages} page(s)",
        set.flashcards.len()
    );

    let mut canvas = Canvas::new(PageSize::A4);
    let mut page_number = 1;
    page_header(&mut canvas, page_number, total_pages, &title);

    canvas.text(
        &format!("Topic: {}", set.topic()),
        MARGIN,
        40.0,
        TextStyle::new(12.0, TEXT_DARK).bold(),
    );
    let meta = TextStyle::new(10.0, TEXT_MUTED);
    canvas.text(&format!("Generated: {}", today.long_format()), MARGIN, 47.0, meta);
    canvas.text(
        &format!("Total Cards: {}", set.flashcards.len()),
        MARGIN,
        54.0,
        meta,
    );

    let mut y = FIRST_CARD_Y;
    for (i, card) in set.flashcards.iter().enumerate() {
        if overflows(y) {
            y = canvas.new_page();
            page_number += 1;
            page_header(&mut canvas, page_number, total_pages, &title);
        }
        let consumed = card_block(&mut canvas, i + 1, card.question(), card.answer(), y, CARD_HEIGHT);
        y += consumed + CARD_GAP;
    }
    debug_assert_eq!(canvas.page_count(), total_pages);

    let label = format!("Generated by {}", config.app_name);
    let note = today.short_format();
    for index in 0..canvas.page_count() {
        canvas.set_page(index);
        footer(&mut canvas, &label, &note);
    }

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Page;
    use crate::types::flashcard::Flashcard;

    fn at() -> Timestamp {
        Timestamp::parse("2026-10-19T09:30:00Z").unwrap()
    }

    fn cards(n: usize) -> Vec<Flashcard> {
        (1..=n)
            .map(|i| Flashcard::new(format!("Q{i}"), format!("A{i}")))
            .collect()
    }

    fn build(topic: Option<&str>, flashcards: Vec<Flashcard>) -> Document {
        let set = FlashcardSet::new(topic.map(str::to_string), flashcards);
        build_flashcards(&set, at(), &ExportConfig::default())
    }

    /// Question texts in reading order.
    fn questions(doc: &Document) -> Vec<String> {
        doc.pages()
            .iter()
            .flat_map(Page::texts)
            .filter(|t| t.starts_with('Q') && *t != "Question:")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_page_count_matches_render() {
        // 2 cards fill page one exactly; the third spills over.
        for (n, expected) in [(0, 1), (1, 1), (2, 1), (3, 2), (4, 2), (5, 3)] {
            assert_eq!(count_pages(n), expected, "pre-pass for {n} cards");
            let doc = build(Some("Algebra"), cards(n));
            assert_eq!(doc.page_count(), expected, "rendered pages for {n} cards");
        }
    }

    #[test]
    fn test_every_header_shows_final_total() {
        let doc = build(Some("Algebra"), cards(5));
        for (i, page) in doc.pages().iter().enumerate() {
            assert!(page.contains_text(&format!("Page {} of 3", i + 1)));
        }
    }

    #[test]
    fn test_single_card_scenario() {
        let doc = build(Some("Algebra"), cards(1));
        assert_eq!(doc.page_count(), 1);
        let page = &doc.pages()[0];
        assert!(page.contains_text("Page 1 of 1"));
        assert!(page.contains_text("Topic: Algebra"));
        assert!(page.contains_text("Total Cards: 1"));
        assert!(page.contains_text("Generated: Monday, October 19, 2026"));
        assert!(page.contains_text("Q1"));
        assert!(page.contains_text("A1"));
    }

    #[test]
    fn test_empty_set_has_header_and_metadata() {
        let doc = build(None, vec![]);
        assert_eq!(doc.page_count(), 1);
        let page = &doc.pages()[0];
        assert!(page.contains_text("Page 1 of 1"));
        assert!(page.contains_text("Topic: Study Material"));
        assert!(page.contains_text("Total Cards: 0"));
        assert!(!page.contains_text("Question:"));
    }

    #[test]
    fn test_order_is_preserved() {
        let doc = build(Some("Order"), cards(7));
        let expected: Vec<String> = (1..=7).map(|i| format!("Q{i}")).collect();
        assert_eq!(questions(&doc), expected);
    }

    #[test]
    fn test_permuted_input_permutes_output() {
        let base = cards(3);
        let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for perm in permutations {
            let input: Vec<Flashcard> = perm.iter().map(|&i| base[i].clone()).collect();
            let expected: Vec<String> = perm.iter().map(|&i| format!("Q{}", i + 1)).collect();
            assert_eq!(questions(&build(Some("Order"), input)), expected);
        }
    }

    #[test]
    fn test_placeholders_are_rendered() {
        let doc = build(Some(""), vec![Flashcard::default()]);
        assert!(doc.contains_text("No question provided"));
        assert!(doc.contains_text("No answer provided"));
        assert!(doc.contains_text("Topic: Study Material"));
    }

    #[test]
    fn test_footer_on_every_page() {
        let doc = build(Some("Algebra"), cards(5));
        for page in doc.pages() {
            assert!(page.contains_text("Generated by Study Assistant"));
            assert!(page.contains_text("10/19/2026"));
        }
    }

    #[test]
    fn test_app_name_from_config() {
        let config = ExportConfig {
            app_name: "Biology Club".to_string(),
            output_dir: None,
        };
        let set = FlashcardSet::new(Some("Cells".to_string()), cards(1));
        let doc = build_flashcards(&set, at(), &config);
        assert!(doc.contains_text("Biology Club Flashcards"));
        assert!(doc.contains_text("Generated by Biology Club"));
    }

    #[test]
    fn test_input_is_untouched() {
        let set = FlashcardSet::new(Some("Algebra".to_string()), cards(3));
        let before = set.clone();
        build_flashcards(&set, at(), &ExportConfig::default());
        assert_eq!(set, before);
    }
}
