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

use crate::types::timestamp::Timestamp;

/// Lower-case `text` and replace every run of non-alphanumeric characters
/// with a single underscore.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

pub fn flashcards_filename(topic: &str) -> String {
    format!("{}_flashcards.pdf", slugify(topic))
}

/// Carries the epoch milliseconds so rapid repeated exports don't collide.
pub fn progress_filename(at: Timestamp) -> String {
    format!("progress-report-{}-{}.pdf", at.date(), at.epoch_millis())
}

/// Upper-case base-36 rendering of the epoch milliseconds.
pub fn report_id(at: Timestamp) -> String {
    to_base36(at.epoch_millis().unsigned_abs()).to_ascii_uppercase()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
