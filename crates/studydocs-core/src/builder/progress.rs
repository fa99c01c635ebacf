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

//! Progress reports.
//!
//! Sections have uneven heights, so pages are added as the content needs
//! them and each header shows the count reached so far.

use crate::canvas::Align;
use crate::canvas::CONTENT_BOTTOM;
use crate::canvas::CONTENT_WIDTH;
use crate::canvas::Canvas;
use crate::canvas::Document;
use crate::canvas::MARGIN;
use crate::canvas::PageSize;
use crate::canvas::TextStyle;
use crate::canvas::metrics::FontWeight;
use crate::canvas::metrics::fit_line;
use crate::config::ExportConfig;
use crate::filename::report_id;
use crate::layout::SECTION_HEADER_ADVANCE;
use crate::layout::SURFACE;
use crate::layout::SectionIcon;
use crate::layout::TEXT_DARK;
use crate::layout::TEXT_MUTED;
use crate::layout::footer;
use crate::layout::page_header;
use crate::layout::section_header;
use crate::layout::stat_box;
use crate::types::progress::ActivityEntry;
use crate::types::progress::Analytics;
use crate::types::progress::ProgressStats;
use crate::types::progress::RawProgress;
use crate::types::timestamp::Timestamp;

pub const MAX_TOPICS: usize = 10;
pub const MAX_ACTIVITIES: usize = 15;

pub const OVERVIEW_TITLE: &str = "Overview Statistics";
pub const TOPICS_TITLE: &str = "Topics Studied";
pub const ACTIVITY_TITLE: &str = "Recent Activity";

const STAT_BOX_HEIGHT: f32 = 25.0;
const STAT_GAP: f32 = 5.0;
const ROW_HEIGHT: f32 = 8.0;
const SECTION_SPACING: f32 = 10.0;
/// Room a list section needs before it starts: its header plus the first
/// row, so a header never ends a page on its own.
const LIST_START_ROOM: f32 = SECTION_HEADER_ADVANCE + ROW_HEIGHT;

/// Vertical position plus the canvas it refers to. Pages are added on
/// demand, and each new header counts the pages created so far.
struct ReportCursor {
    canvas: Canvas,
    y: f32,
    title: &'static str,
}

impl ReportCursor {
    fn new(title: &'static str) -> Self {
        let mut canvas = Canvas::new(PageSize::A4);
        page_header(&mut canvas, 1, 1, title);
        Self {
            canvas,
            y: 0.0,
            title,
        }
    }

    /// Start a new page unless `needed` more millimetres fit on this one.
    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > CONTENT_BOTTOM {
            self.y = self.canvas.new_page();
            let n = self.canvas.page_count();
            page_header(&mut self.canvas, n, n, self.title);
        }
    }
}

/// The six overview values, in grid order, as (label, value).
pub fn overview_stats(stats: &ProgressStats) -> [(&'static str, String); 6] {
    [
        ("Flashcards\nLearned", stats.total_flashcards_learned.to_string()),
        ("Quizzes\nTaken", stats.total_quizzes_taken.to_string()),
        ("Study Time\n(hours)", format!("{:.1}", stats.study_hours())),
        ("Current Streak\n(days)", stats.current_streak.to_string()),
        ("Best Streak\n(days)", stats.longest_streak.to_string()),
        (
            "Average\nQuiz Score",
            format!("{}%", stats.average_quiz_score.round() as u64),
        ),
    ]
}

/// Normalize the input, then lay out the report.
pub fn build_progress(
    progress: &RawProgress,
    analytics: &Analytics,
    generated_at: Timestamp,
    config: &ExportConfig,
) -> Document {
    let stats = ProgressStats::normalize(progress);
    let activity = analytics.entries();
    render_report(&stats, &activity, generated_at, config)
}

pub fn render_report(
    stats: &ProgressStats,
    activity: &[ActivityEntry],
    generated_at: Timestamp,
    config: &ExportConfig,
) -> Document {
    let mut cursor = ReportCursor::new("Learning Progress Report");
    cursor.canvas.text(
        &format!("Generated on {}", generated_at.date().long_format()),
        MARGIN,
        40.0,
        TextStyle::new(10.0, TEXT_MUTED),
    );
    cursor.y = 50.0;

    overview_section(&mut cursor, stats);
    if !stats.topics_studied.is_empty() {
        topics_section(&mut cursor, stats);
    }
    if !activity.is_empty() {
        activity_section(&mut cursor, activity);
    }

    let label = format!("{} - Learning Progress Report", config.app_name);
    let note = format!("Report ID: {}", report_id(generated_at));
    footer(&mut cursor.canvas, &label, &note);

    log::debug!(
        "Progress report laid out on {} page(s)",
        cursor.canvas.page_count()
    );
    cursor.canvas.finish()
}

fn overview_section(cursor: &mut ReportCursor, stats: &ProgressStats) {
    let grid_height = 2.0 * STAT_BOX_HEIGHT + STAT_GAP;
    cursor.ensure_space(SECTION_HEADER_ADVANCE + grid_height);
    cursor.y = section_header(&mut cursor.canvas, OVERVIEW_TITLE, SectionIcon::Statistics, cursor.y);

    let box_width = (CONTENT_WIDTH - 2.0 * STAT_GAP) / 3.0;
    for (i, (label, value)) in overview_stats(stats).iter().enumerate() {
        let col = (i % 3) as f32;
        let row = (i / 3) as f32;
        let x = MARGIN + col * (box_width + STAT_GAP);
        let y = cursor.y + row * (STAT_BOX_HEIGHT + STAT_GAP);
        stat_box(&mut cursor.canvas, label, value, x, y, box_width, STAT_BOX_HEIGHT);
    }
    cursor.y += grid_height + SECTION_SPACING;
}

fn topics_section(cursor: &mut ReportCursor, stats: &ProgressStats) {
    cursor.ensure_space(LIST_START_ROOM);
    cursor.y = section_header(&mut cursor.canvas, TOPICS_TITLE, SectionIcon::Topics, cursor.y);

    let name_style = TextStyle::new(10.0, TEXT_DARK);
    let count_style = TextStyle::new(9.0, TEXT_MUTED).align(Align::Right);
    for (i, topic) in stats.topics_studied.iter().take(MAX_TOPICS).enumerate() {
        cursor.ensure_space(ROW_HEIGHT);
        let y = cursor.y;
        if i % 2 == 0 {
            cursor.canvas.fill_rect(MARGIN, y, CONTENT_WIDTH, ROW_HEIGHT, SURFACE);
        }
        let name = fit_line(
            &format!("{}. {}", i + 1, topic.topic),
            CONTENT_WIDTH - 60.0,
            name_style.size,
            FontWeight::Normal,
        );
        cursor.canvas.text(&name, MARGIN + 4.0, y + 5.5, name_style);
        if topic.flashcards_count > 0 || topic.quizzes_count > 0 {
            cursor.canvas.text(
                &format!(
                    "({} cards, {} quizzes)",
                    topic.flashcards_count, topic.quizzes_count
                ),
                MARGIN + CONTENT_WIDTH - 4.0,
                y + 5.5,
                count_style,
            );
        }
        cursor.y += ROW_HEIGHT;
    }
    cursor.y += SECTION_SPACING;
}

fn activity_section(cursor: &mut ReportCursor, activity: &[ActivityEntry]) {
    cursor.ensure_space(LIST_START_ROOM);
    cursor.y = section_header(&mut cursor.canvas, ACTIVITY_TITLE, SectionIcon::Activity, cursor.y);

    let date_style = TextStyle::new(9.0, TEXT_MUTED);
    let kind_style = TextStyle::new(9.0, TEXT_DARK).bold();
    let detail_style = TextStyle::new(9.0, TEXT_DARK);
    let detail_x = MARGIN + 65.0;
    let detail_width = MARGIN + CONTENT_WIDTH - 4.0 - detail_x;
    for entry in activity.iter().take(MAX_ACTIVITIES) {
        cursor.ensure_space(ROW_HEIGHT);
        let baseline = cursor.y + 5.5;
        cursor.canvas.text(&entry.date_label(), MARGIN + 4.0, baseline, date_style);
        cursor.canvas.text(&entry.kind.label(), MARGIN + 35.0, baseline, kind_style);
        let detail = fit_line(&entry.detail(), detail_width, detail_style.size, FontWeight::Normal);
        cursor.canvas.text(&detail, detail_x, baseline, detail_style);
        cursor.y += ROW_HEIGHT;
    }
    cursor.y += SECTION_SPACING;
}
