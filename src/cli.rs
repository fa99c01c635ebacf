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

use std::path::PathBuf;

use clap::Parser;
use studydocs_core::error::Fallible;

use crate::cmd::export::OutputOptions;
use crate::cmd::export::export_flashcards;
use crate::cmd::export::export_progress;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Export a flashcard set to PDF.
    Flashcards {
        /// Path to a JSON file: either `{"topic": ..., "flashcards": [...]}` or a bare array of cards.
        input: PathBuf,
        /// Topic shown in the document and used for the filename. Overrides the topic in the input file.
        #[arg(long)]
        topic: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export a progress report to PDF.
    Progress {
        /// Path to the progress JSON file.
        progress: PathBuf,
        /// Optional path to the analytics JSON file with recent activity.
        #[arg(long)]
        analytics: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Directory to write the PDF into. By default, the configured directory or the current working directory is used.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Open the written file with the default viewer.
    #[arg(long)]
    open: bool,
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        OutputOptions {
            output_dir: args.output_dir,
            config: args.config,
        }
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let (path, open) = match cli {
        Command::Flashcards {
            input,
            topic,
            output,
        } => {
            let open = output.open;
            (export_flashcards(input, topic, output.into()).await?, open)
        }
        Command::Progress {
            progress,
            analytics,
            output,
        } => {
            let open = output.open;
            (export_progress(progress, analytics, output.into()).await?, open)
        }
    };
    println!("{}", path.display());
    if open {
        if let Err(e) = open::that(&path) {
            log::warn!("Failed to open {}: {e}", path.display());
        }
    }
    Ok(())
}
