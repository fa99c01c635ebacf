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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use studydocs_core::config::ExportConfig;
use studydocs_core::error::ErrorReport;
use studydocs_core::error::Fallible;
use studydocs_core::export::Export;
use studydocs_core::export::Exporter;
use studydocs_core::types::flashcard::FlashcardSet;
use studydocs_core::types::progress::Analytics;
use studydocs_core::types::progress::RawProgress;
use studydocs_core::types::timestamp::Timestamp;
use studydocs_core::writer::DirectorySink;
use tokio::task::spawn_blocking;

/// Where an export goes and which configuration applies.
pub struct OutputOptions {
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl OutputOptions {
    /// Load the configuration file, if any. The `--output-dir` flag wins over
    /// the configured directory, which wins over the working directory.
    fn resolve(&self) -> Fallible<(ExportConfig, PathBuf)> {
        let config = match &self.config {
            Some(path) => ExportConfig::load(path)?,
            None => ExportConfig::default(),
        };
        let dir = self
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((config, dir))
    }
}

/// Export the flashcard set in `input`. Returns the path of the written file.
pub async fn export_flashcards(
    input: PathBuf,
    topic: Option<String>,
    options: OutputOptions,
) -> Fallible<PathBuf> {
    run_blocking(move || {
        let mut set = FlashcardSet::from_json(&read_input(&input)?)?;
        if topic.is_some() {
            set.topic = topic;
        }
        let (config, dir) = options.resolve()?;
        let export = Exporter::new(config).flashcards(&set, Timestamp::now());
        write_export(&export, dir)
    })
    .await
}

/// Export a progress report. Without `analytics`, the report has no recent
/// activity section.
pub async fn export_progress(
    progress: PathBuf,
    analytics: Option<PathBuf>,
    options: OutputOptions,
) -> Fallible<PathBuf> {
    run_blocking(move || {
        let progress = RawProgress::from_json(&read_input(&progress)?)?;
        let analytics = match analytics {
            Some(path) => Analytics::from_json(&read_input(&path)?)?,
            None => Analytics::default(),
        };
        let (config, dir) = options.resolve()?;
        let export = Exporter::new(config).progress(&progress, &analytics, Timestamp::now());
        write_export(&export, dir)
    })
    .await
}

fn read_input(path: &Path) -> Fallible<String> {
    read_to_string(path)
        .map_err(|e| ErrorReport::new(format!("failed to read '{}': {e}", path.display())))
}

fn write_export(export: &Export, dir: PathBuf) -> Fallible<PathBuf> {
    let mut sink = DirectorySink::new(dir);
    let filename = export.save_to(&mut sink)?;
    Ok(sink.path_for(&filename))
}

async fn run_blocking<T, F>(f: F) -> Fallible<T>
where
    T: Send + 'static,
    F: FnOnce() -> Fallible<T> + Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ErrorReport::new(format!("export task failed: {e}")))?
}
