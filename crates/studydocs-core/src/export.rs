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

//! Entry points: build a document, name it, render it, save it.

use crate::builder::build_flashcards;
use crate::builder::build_progress;
use crate::canvas::Document;
use crate::config::ExportConfig;
use crate::error::Fallible;
use crate::filename::flashcards_filename;
use crate::filename::progress_filename;
#[cfg(feature = "clock")]
use crate::types::flashcard::Flashcard;
use crate::types::flashcard::FlashcardSet;
use crate::types::progress::Analytics;
use crate::types::progress::RawProgress;
use crate::types::timestamp::Timestamp;
use crate::writer::DocumentInfo;
use crate::writer::DocumentSink;
use crate::writer::save;

/// A built document together with the name it is saved under.
#[derive(Debug)]
pub struct Export {
    pub filename: String,
    pub document: Document,
    pub info: DocumentInfo,
}

impl Export {
    /// Render and hand the document to `sink`. Returns the filename.
    pub fn save_to(&self, sink: &mut dyn DocumentSink) -> Fallible<String> {
        save(&self.document, &self.filename, &self.info, sink)?;
        Ok(self.filename.clone())
    }
}

/// Builds exports with a fixed configuration. Holds no other state, so one
/// exporter can serve any number of exports.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn flashcards(&self, set: &FlashcardSet, at: Timestamp) -> Export {
        let document = build_flashcards(set, at, &self.config);
        Export {
            filename: flashcards_filename(set.topic()),
            info: DocumentInfo {
                title: format!("{} Flashcards", set.topic()),
                creator: self.config.app_name.clone(),
                created_at: at,
            },
            document,
        }
    }

    pub fn progress(&self, progress: &RawProgress, analytics: &Analytics, at: Timestamp) -> Export {
        let document = build_progress(progress, analytics, at, &self.config);
        Export {
            filename: progress_filename(at),
            info: DocumentInfo {
                title: "Learning Progress Report".to_string(),
                creator: self.config.app_name.clone(),
                created_at: at,
            },
            document,
        }
    }
}

/// Export `flashcards` as a PDF named after `topic`. Returns the filename.
#[cfg(feature = "clock")]
pub fn export_flashcards_to_pdf(
    flashcards: &[Flashcard],
    topic: Option<&str>,
    sink: &mut dyn DocumentSink,
) -> Fallible<String> {
    let set = FlashcardSet::new(topic.map(str::to_string), flashcards.to_vec());
    Exporter::default()
        .flashcards(&set, Timestamp::now())
        .save_to(sink)
}

/// Export a progress report. Returns the filename.
#[cfg(feature = "clock")]
pub fn export_progress_to_pdf(
    progress: &RawProgress,
    analytics: &Analytics,
    sink: &mut dyn DocumentSink,
) -> Fallible<String> {
    Exporter::default()
        .progress(progress, analytics, Timestamp::now())
        .save_to(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::flashcard::Flashcard;
    use crate::writer::MemorySink;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    #[test]
    fn test_flashcards_scenario() -> Fallible<()> {
        let set = FlashcardSet::new(Some("Algebra".to_string()), vec![Flashcard::new("Q1", "A1")]);
        let export = Exporter::default().flashcards(&set, at(1_760_000_000_000));
        assert_eq!(export.filename, "algebra_flashcards.pdf");
        assert_eq!(export.document.page_count(), 1);

        let mut sink = MemorySink::default();
        assert_eq!(export.save_to(&mut sink)?, "algebra_flashcards.pdf");
        let loaded = lopdf::Document::load_mem(&sink.saved[0].1)?;
        assert_eq!(loaded.get_pages().len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_topic_filename() {
        let set = FlashcardSet::new(None, vec![]);
        let export = Exporter::default().flashcards(&set, at(0));
        assert_eq!(export.filename, "study_material_flashcards.pdf");
        assert!(export.document.contains_text("Topic: Study Material"));
    }

    #[test]
    fn test_same_topic_same_filename() {
        let set = FlashcardSet::new(Some("JavaScript Functions!".to_string()), vec![]);
        let exporter = Exporter::default();
        let a = exporter.flashcards(&set, at(1_000));
        let b = exporter.flashcards(&set, at(1_000));
        assert_eq!(a.filename, "javascript_functions__flashcards.pdf");
        assert_eq!(a.filename, b.filename);
    }

    #[test]
    fn test_progress_filenames_differ_by_millisecond() {
        let exporter = Exporter::default();
        let progress = RawProgress::default();
        let analytics = Analytics::default();
        let a = exporter.progress(&progress, &analytics, at(1_760_000_000_000));
        let b = exporter.progress(&progress, &analytics, at(1_760_000_000_001));
        assert_ne!(a.filename, b.filename);
        assert!(a.filename.starts_with("progress-report-2025-10-09-"));
    }

    #[test]
    fn test_progress_export_renders() -> Fallible<()> {
        let progress = RawProgress::from_json(r#"{"stats": {"totalFlashcardsLearned": 12}}"#)?;
        let analytics = Analytics::from_json(
            r#"{"recentActivity": [{"date": 1760000000000, "activityType": "flashcard", "activityData": {"topic": "Cells"}}]}"#,
        )?;
        let mut sink = MemorySink::default();
        let filename = Exporter::default()
            .progress(&progress, &analytics, at(1_760_000_000_000))
            .save_to(&mut sink)?;
        assert_eq!(filename, "progress-report-2025-10-09-1760000000000.pdf");
        assert!(lopdf::Document::load_mem(&sink.saved[0].1).is_ok());
        Ok(())
    }

    #[cfg(feature = "clock")]
    #[test]
    fn test_export_flashcards_to_pdf() -> Fallible<()> {
        let mut sink = MemorySink::default();
        let name = export_flashcards_to_pdf(&[Flashcard::new("Q", "A")], Some("Algebra"), &mut sink)?;
        assert_eq!(name, "algebra_flashcards.pdf");
        assert_eq!(sink.saved.len(), 1);
        Ok(())
    }
}
