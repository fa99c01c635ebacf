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

//! studydocs-core: paginated PDF export of study material.
//!
//! Two kinds of document are built here:
//! - Flashcard sets, laid out as fixed-height question/answer cards
//! - Progress reports with overview statistics, topics, and recent activity
//!
//! Builders draw onto an in-memory [`canvas::Canvas`]; [`writer`] turns the
//! finished [`canvas::Document`] into PDF bytes and hands them to a
//! [`writer::DocumentSink`].

pub mod builder;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod filename;
pub mod layout;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use config::ExportConfig;
pub use error::{ErrorReport, Fallible, fail};
pub use export::{Export, Exporter};
#[cfg(feature = "clock")]
pub use export::{export_flashcards_to_pdf, export_progress_to_pdf};
pub use types::date::Date;
pub use types::flashcard::{Flashcard, FlashcardSet};
pub use types::progress::{Analytics, ProgressStats, RawProgress};
pub use types::timestamp::Timestamp;
pub use writer::{DirectorySink, DocumentSink, MemorySink};
