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

//! WASM bindings for studydocs - exports study material to PDF from the browser.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::console;

use studydocs_core::error::ErrorReport;
use studydocs_core::error::Fallible;
use studydocs_core::export::Exporter;
use studydocs_core::types::flashcard::FlashcardSet;
use studydocs_core::types::progress::Analytics;
use studydocs_core::types::progress::RawProgress;
use studydocs_core::types::timestamp::Timestamp;

mod download;

use download::BrowserDownload;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"studydocs WASM initialized".into());
}

/// Export flashcards to PDF and download the file.
///
/// `flashcards_json` is either an array of `{question, answer}` objects or a
/// `{topic, flashcards}` object. A `topic` argument takes precedence over the
/// one in the JSON. Resolves to the filename.
#[wasm_bindgen(js_name = exportFlashcardsToPDF)]
pub fn export_flashcards_to_pdf(flashcards_json: String, topic: Option<String>) -> Promise {
    future_to_promise(async move { settle(flashcards(&flashcards_json, topic)) })
}

/// Export a progress report to PDF and download the file. Resolves to the
/// filename.
#[wasm_bindgen(js_name = exportProgressToPDF)]
pub fn export_progress_to_pdf(progress_json: String, analytics_json: Option<String>) -> Promise {
    future_to_promise(async move { settle(progress(&progress_json, analytics_json.as_deref())) })
}

fn flashcards(json: &str, topic: Option<String>) -> Fallible<String> {
    let mut set = FlashcardSet::from_json(json)?;
    if topic.is_some() {
        set.topic = topic;
    }
    Exporter::default()
        .flashcards(&set, now()?)
        .save_to(&mut BrowserDownload)
}

fn progress(json: &str, analytics_json: Option<&str>) -> Fallible<String> {
    let progress = RawProgress::from_json(json)?;
    let analytics = match analytics_json {
        Some(json) => Analytics::from_json(json)?,
        None => Analytics::default(),
    };
    Exporter::default()
        .progress(&progress, &analytics, now()?)
        .save_to(&mut BrowserDownload)
}

fn now() -> Fallible<Timestamp> {
    let millis = js_sys::Date::now() as i64;
    Timestamp::from_millis(millis)
        .ok_or_else(|| ErrorReport::new(format!("clock out of range: {millis}")))
}

fn settle(result: Fallible<String>) -> Result<JsValue, JsValue> {
    match result {
        Ok(filename) => {
            console::log_1(&format!("Exported {filename}").into());
            Ok(JsValue::from_str(&filename))
        }
        Err(e) => {
            console::error_1(&e.to_string().into());
            Err(JsValue::from_str(e.message()))
        }
    }
}
