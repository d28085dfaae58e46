use std::{
    fmt,
    str::FromStr,
};

use chrono::Utc;
use serde::{
    Deserialize,
    Serialize,
};

use super::TadokuError;
use crate::{
    segmentation::WordClass,
    vocabulary::category::Category,
};

/// Unix seconds. Zero means "never".
pub type Timestamp = i64;

pub fn now() -> Timestamp {
    Utc::now().timestamp()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Word,
    Kanji,
}

/// Persistent vocabulary record, unique by `base_form`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Word {
    pub id: i64,
    pub base_form: String,
    #[serde(default)]
    pub kind: RecordKind,
    pub category: Category,
    pub rank: i64,
    pub definitions: String, // serialized dictionary entries, or the kanji character for kanji
    pub countdown: u32,
    pub drill_count: u32,
    pub date_added: Timestamp,
    pub date_marked: Timestamp,
    pub date_last_drill: Timestamp,
    pub date_last_wrong: Timestamp,
}

impl Word {
    pub fn is_kanji(&self) -> bool {
        self.kind == RecordKind::Kanji
    }
}

/// A record staged by the extractor, not yet given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWord {
    pub base_form: String,
    pub kind: RecordKind,
    pub category: Category,
    pub definitions: String,
}

impl NewWord {
    pub fn into_word(self, id: i64, rank: i64, countdown: u32, date_added: Timestamp) -> Word {
        Word {
            id,
            base_form: self.base_form,
            kind: self.kind,
            category: self.category,
            rank,
            definitions: self.definitions,
            countdown,
            drill_count: 0,
            date_added,
            date_marked: date_added,
            date_last_drill: 0,
            date_last_wrong: 0,
        }
    }
}

/// Result of an insert-if-absent: the id now owning the base form, and whether it was new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub id: i64,
    pub created: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    NeverRead,
    Read,
    Current,
    Archived,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::NeverRead => "never_read",
            StoryStatus::Read => "read",
            StoryStatus::Current => "current",
            StoryStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryStatus {
    type Err = TadokuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "never_read" | "neverread" => Ok(StoryStatus::NeverRead),
            "read" => Ok(StoryStatus::Read),
            "current" => Ok(StoryStatus::Current),
            "archived" => Ok(StoryStatus::Archived),
            _ => Err(TadokuError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineWord {
    pub base_form: String,
    pub surface: String,
    pub pos: WordClass,
    pub category: Category,
    pub word_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineKanji {
    pub literal: String,
    pub kanji_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Line {
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub words: Vec<LineWord>,
    #[serde(default)]
    pub kanji: Vec<LineKanji>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub status: StoryStatus,
    pub date_added: Timestamp,
    pub content: String,
    pub lines: Vec<Line>,
}

/// Listing row without content or lines.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StorySummary {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub status: StoryStatus,
    pub date_added: Timestamp,
}

impl From<&Story> for StorySummary {
    fn from(story: &Story) -> Self {
        StorySummary {
            id: story.id,
            title: story.title.clone(),
            link: story.link.clone(),
            status: story.status,
            date_added: story.date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_status_parsing() {
        assert_eq!("never-read".parse::<StoryStatus>().unwrap(), StoryStatus::NeverRead);
        assert_eq!("Archived".parse::<StoryStatus>().unwrap(), StoryStatus::Archived);
        assert!(matches!(
            "finished".parse::<StoryStatus>(),
            Err(TadokuError::InvalidStatus(_))
        ));
        assert_eq!(serde_json::to_string(&StoryStatus::NeverRead).unwrap(), "\"never_read\"");
    }

    #[test]
    fn test_new_word_starts_undrilled() {
        let staged = NewWord {
            base_form: "桃".to_string(),
            kind: RecordKind::Word,
            category: Category::empty(),
            definitions: "[]".to_string(),
        };
        let word = staged.into_word(3, 0, 7, 1_000);
        assert_eq!(word.id, 3);
        assert_eq!(word.countdown, 7);
        assert_eq!(word.drill_count, 0);
        assert_eq!(word.date_last_drill, 0);
        assert_eq!(word.date_last_wrong, 0);
        assert_eq!(word.date_added, 1_000);
    }
}
