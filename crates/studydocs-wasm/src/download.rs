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

//! Saving documents by triggering a browser download.

use studydocs_core::error::ErrorReport;
use studydocs_core::error::Fallible;
use studydocs_core::writer::DocumentSink;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Blob;
use web_sys::BlobPropertyBag;
use web_sys::HtmlAnchorElement;
use web_sys::Url;

/// How long the object URL outlives the click. Revoking it in the same tick
/// can cancel the download.
const REVOKE_DELAY_MS: i32 = 1000;

/// Hands each document to the browser as a file download.
pub struct BrowserDownload;

impl DocumentSink for BrowserDownload {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Fallible<()> {
        download(filename, bytes).map_err(|e| js_error("download failed", e))
    }
}

fn download(filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an anchor element"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let revoke = Closure::once_into_js(move || {
        let _ = Url::revoke_object_url(&url);
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref(),
        REVOKE_DELAY_MS,
    )?;
    Ok(())
}

fn js_error(context: &str, value: JsValue) -> ErrorReport {
    match value.as_string() {
        Some(s) => ErrorReport::new(format!("{context}: {s}")),
        None => ErrorReport::new(format!("{context}: {value:?}")),
    }
}
