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

//! Progress and analytics input.
//!
//! Clients send progress data in two shapes: the counters either live under
//! a `stats` object or directly on the progress object. [`RawProgress`]
//! accepts both, and [`ProgressStats::normalize`] folds them into the one
//! record the report builder reads.

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

/// Counter fields as they appear on the wire. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    pub total_flashcards_learned: Option<f64>,
    pub total_quizzes_taken: Option<f64>,
    pub average_quiz_score: Option<f64>,
    pub total_study_time: Option<f64>,
    pub current_streak: Option<f64>,
    pub longest_streak: Option<f64>,
    pub total_sessions: Option<f64>,
    pub topics_studied: Option<Vec<RawTopic>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawProgress {
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(flatten)]
    pub top_level: RawStats,
}

impl RawProgress {
    pub fn from_json(text: &str) -> Fallible<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A topic entry is either a detailed record or just a name.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTopic {
    Name(String),
    Detailed {
        #[serde(default)]
        topic: Option<String>,
        #[serde(default, rename = "flashcardsCount")]
        flashcards_count: Option<f64>,
        #[serde(default, rename = "quizzesCount")]
        quizzes_count: Option<f64>,
        #[serde(default, rename = "averageScore")]
        average_score: Option<f64>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopicSummary {
    pub topic: String,
    pub flashcards_count: u64,
    pub quizzes_count: u64,
    pub average_score: f64,
}

impl From<&RawTopic> for TopicSummary {
    fn from(raw: &RawTopic) -> Self {
        match raw {
            RawTopic::Name(name) => TopicSummary {
                topic: name.clone(),
                flashcards_count: 0,
                quizzes_count: 0,
                average_score: 0.0,
            },
            RawTopic::Detailed {
                topic,
                flashcards_count,
                quizzes_count,
                average_score,
            } => TopicSummary {
                topic: topic.clone().unwrap_or_else(|| "Untitled topic".to_string()),
                flashcards_count: count(*flashcards_count),
                quizzes_count: count(*quizzes_count),
                average_score: average_score.unwrap_or(0.0),
            },
        }
    }
}

/// The canonical progress record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressStats {
    pub total_flashcards_learned: u64,
    pub total_quizzes_taken: u64,
    /// Percentage, 0 to 100.
    pub average_quiz_score: f64,
    /// Minutes.
    pub total_study_time: f64,
    pub current_streak: u64,
    pub longest_streak: u64,
    pub total_sessions: u64,
    pub topics_studied: Vec<TopicSummary>,
}

impl ProgressStats {
    /// Resolve every field through `stats.<field>`, then `<field>`, then the
    /// default. A zero or missing number in the first location falls
    /// through to the second.
    pub fn normalize(raw: &RawProgress) -> Self {
        let empty = RawStats::default();
        let nested = raw.stats.as_ref().unwrap_or(&empty);
        let top = &raw.top_level;
        let pick = |f: fn(&RawStats) -> Option<f64>| -> f64 {
            [f(nested), f(top)]
                .into_iter()
                .flatten()
                .find(|v| v.is_finite() && *v != 0.0)
                .unwrap_or(0.0)
        };
        let topics = nested
            .topics_studied
            .as_ref()
            .or(top.topics_studied.as_ref())
            .map(|topics| topics.iter().map(TopicSummary::from).collect())
            .unwrap_or_default();
        ProgressStats {
            total_flashcards_learned: count(Some(pick(|s| s.total_flashcards_learned))),
            total_quizzes_taken: count(Some(pick(|s| s.total_quizzes_taken))),
            average_quiz_score: pick(|s| s.average_quiz_score).clamp(0.0, 100.0),
            total_study_time: pick(|s| s.total_study_time).max(0.0),
            current_streak: count(Some(pick(|s| s.current_streak))),
            longest_streak: count(Some(pick(|s| s.longest_streak))),
            total_sessions: count(Some(pick(|s| s.total_sessions))),
            topics_studied: topics,
        }
    }

    /// Study time in hours, rounded to one decimal.
    pub fn study_hours(&self) -> f64 {
        (self.total_study_time / 60.0 * 10.0).round() / 10.0
    }
}

fn count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

/// Activity dates arrive as epoch milliseconds, as strings, or as
/// Firestore-style `{seconds, nanoseconds}` objects.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Millis(f64),
    Text(String),
    Seconds {
        seconds: i64,
        #[serde(default)]
        nanoseconds: i64,
    },
}

impl RawDate {
    pub fn resolve(&self) -> Option<Timestamp> {
        match self {
            RawDate::Millis(ms) if ms.is_finite() => Timestamp::from_millis(*ms as i64),
            RawDate::Millis(_) => None,
            RawDate::Text(s) => Timestamp::parse(s),
            RawDate::Seconds {
                seconds,
                nanoseconds,
            } => seconds
                .checked_mul(1000)
                .and_then(|ms| ms.checked_add(nanoseconds / 1_000_000))
                .and_then(Timestamp::from_millis),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityData {
    pub topic: Option<String>,
    pub percentage: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    pub date: Option<RawDate>,
    pub activity_type: Option<String>,
    pub activity_data: Option<RawActivityData>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub recent_activity: Vec<RawActivity>,
}

impl Analytics {
    pub fn from_json(text: &str) -> Fallible<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.recent_activity.iter().map(ActivityEntry::from).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActivityKind {
    Flashcard,
    Quiz,
    Chat,
    Other(String),
}

impl ActivityKind {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "flashcard" => ActivityKind::Flashcard,
            "quiz" => ActivityKind::Quiz,
            "chat" => ActivityKind::Chat,
            _ => ActivityKind::Other(s.trim().to_string()),
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> String {
        match self {
            ActivityKind::Flashcard => "Flashcard".to_string(),
            ActivityKind::Quiz => "Quiz".to_string(),
            ActivityKind::Chat => "Chat".to_string(),
            ActivityKind::Other(s) => {
                let mut chars = s.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "Activity".to_string(),
                }
            }
        }
    }
}

/// One normalized row of the recent activity timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub date: Option<Timestamp>,
    pub kind: ActivityKind,
    pub topic: Option<String>,
    pub percentage: Option<f64>,
}

impl ActivityEntry {
    /// Topic plus, for quizzes with a score, the percentage.
    pub fn detail(&self) -> String {
        let topic = match &self.topic {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => "General".to_string(),
        };
        match (&self.kind, self.percentage) {
            (ActivityKind::Quiz, Some(p)) if p.is_finite() => format!("{topic} ({}%)", p.round()),
            _ => topic,
        }
    }

    pub fn date_label(&self) -> String {
        match self.date {
            Some(ts) => ts.date().short_format(),
            None => "Unknown date".to_string(),
        }
    }
}

impl From<&RawActivity> for ActivityEntry {
    fn from(raw: &RawActivity) -> Self {
        let data = raw.activity_data.clone().unwrap_or_default();
        ActivityEntry {
            date: raw.date.as_ref().and_then(RawDate::resolve),
            kind: ActivityKind::parse(raw.activity_type.as_deref().unwrap_or("")),
            topic: data.topic,
            percentage: data.percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_shape() -> Fallible<()> {
        let raw = RawProgress::from_json(r#"{"stats": {"totalQuizzesTaken": 5}}"#)?;
        assert_eq!(ProgressStats::normalize(&raw).total_quizzes_taken, 5);
        Ok(())
    }

    #[test]
    fn test_flat_shape() -> Fallible<()> {
        let raw = RawProgress::from_json(r#"{"totalQuizzesTaken": 5}"#)?;
        assert_eq!(ProgressStats::normalize(&raw).total_quizzes_taken, 5);
        Ok(())
    }

    #[test]
    fn test_neither_shape() -> Fallible<()> {
        let raw = RawProgress::from_json("{}")?;
        let stats = ProgressStats::normalize(&raw);
        assert_eq!(stats, ProgressStats::default());
        Ok(())
    }

    #[test]
    fn test_zero_falls_through() -> Fallible<()> {
        let raw = RawProgress::from_json(
            r#"{"stats": {"currentStreak": 0, "longestStreak": 9}, "currentStreak": 4, "longestStreak": 2}"#,
        )?;
        let stats = ProgressStats::normalize(&raw);
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 9);
        Ok(())
    }

    #[test]
    fn test_study_hours() {
        let stats = ProgressStats {
            total_study_time: 135.0,
            ..ProgressStats::default()
        };
        assert_eq!(stats.study_hours(), 2.3);
    }

    #[test]
    fn test_mixed_topics() -> Fallible<()> {
        let raw = RawProgress::from_json(
            r#"{"topicsStudied": ["Biology", {"topic": "Chemistry", "flashcardsCount": 12, "quizzesCount": 2, "averageScore": 81.5}]}"#,
        )?;
        let stats = ProgressStats::normalize(&raw);
        assert_eq!(stats.topics_studied.len(), 2);
        assert_eq!(stats.topics_studied[0].topic, "Biology");
        assert_eq!(stats.topics_studied[0].flashcards_count, 0);
        assert_eq!(stats.topics_studied[1].flashcards_count, 12);
        assert_eq!(stats.topics_studied[1].quizzes_count, 2);
        Ok(())
    }

    #[test]
    fn test_nested_topics_take_precedence() -> Fallible<()> {
        let raw = RawProgress::from_json(
            r#"{"stats": {"topicsStudied": ["A"]}, "topicsStudied": ["B", "C"]}"#,
        )?;
        let stats = ProgressStats::normalize(&raw);
        assert_eq!(stats.topics_studied.len(), 1);
        assert_eq!(stats.topics_studied[0].topic, "A");
        Ok(())
    }

    #[test]
    fn test_activity_dates() -> Fallible<()> {
        let analytics = Analytics::from_json(
            r#"{"recentActivity": [
                {"date": 1760000000123, "activityType": "quiz", "activityData": {"topic": "Cells", "percentage": 87.4}},
                {"date": "2024-02-03T10:00:00Z", "activityType": "flashcard"},
                {"date": {"seconds": 1700000000, "nanoseconds": 0}, "activityType": "chat"},
                {"date": "not a date", "activityType": "reading"}
            ]}"#,
        )?;
        let entries = analytics.entries();
        assert_eq!(entries[0].date_label(), "10/9/2025");
        assert_eq!(entries[0].kind.label(), "Quiz");
        assert_eq!(entries[0].detail(), "Cells (87%)");
        assert_eq!(entries[1].date_label(), "2/3/2024");
        assert_eq!(entries[1].detail(), "General");
        assert_eq!(entries[2].date_label(), "11/14/2023");
        assert_eq!(entries[2].kind, ActivityKind::Chat);
        assert_eq!(entries[3].date_label(), "Unknown date");
        assert_eq!(entries[3].kind.label(), "Reading");
        Ok(())
    }

    #[test]
    fn test_out_of_range_seconds_are_unknown() -> Fallible<()> {
        let analytics = Analytics::from_json(
            r#"{"recentActivity": [
                {"date": {"seconds": 9223372036854775807}, "activityType": "quiz"},
                {"date": {"seconds": -9223372036854775808, "nanoseconds": -999999999}, "activityType": "quiz"},
                {"date": {"seconds": 9223372036854775, "nanoseconds": 999999999}, "activityType": "quiz"}
            ]}"#,
        )?;
        for entry in analytics.entries() {
            assert_eq!(entry.date, None);
            assert_eq!(entry.date_label(), "Unknown date");
        }
        Ok(())
    }

    #[test]
    fn test_percentage_only_for_quizzes() {
        let entry = ActivityEntry {
            date: None,
            kind: ActivityKind::Flashcard,
            topic: Some("Cells".to_string()),
            percentage: Some(50.0),
        };
        assert_eq!(entry.detail(), "Cells");
    }

    #[test]
    fn test_missing_recent_activity() -> Fallible<()> {
        let analytics = Analytics::from_json("{}")?;
        assert!(analytics.entries().is_empty());
        Ok(())
    }
}
