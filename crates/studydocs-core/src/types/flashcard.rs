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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

pub const QUESTION_PLACEHOLDER: &str = "No question provided";
pub const ANSWER_PLACEHOLDER: &str = "No answer provided";
pub const TOPIC_PLACEHOLDER: &str = "Study Material";

/// A question/answer pair. Identity is its position in the set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
        }
    }

    pub fn question(&self) -> &str {
        or_placeholder(self.question.as_deref(), QUESTION_PLACEHOLDER)
    }

    pub fn answer(&self) -> &str {
        or_placeholder(self.answer.as_deref(), ANSWER_PLACEHOLDER)
    }
}

/// The export input for a flashcard document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl FlashcardSet {
    pub fn new(topic: Option<String>, flashcards: Vec<Flashcard>) -> Self {
        Self { topic, flashcards }
    }

    pub fn topic(&self) -> &str {
        or_placeholder(self.topic.as_deref(), TOPIC_PLACEHOLDER)
    }

    /// Parse either `{"topic": ..., "flashcards": [...]}` or a bare array of
    /// cards.
    pub fn from_json(text: &str) -> Fallible<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Set(FlashcardSet),
            Cards(Vec<Flashcard>),
        }
        let set = match serde_json::from_str::<Shape>(text)? {
            Shape::Set(set) => set,
            Shape::Cards(flashcards) => FlashcardSet::new(None, flashcards),
        };
        Ok(set)
    }
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => placeholder,
    }
}
