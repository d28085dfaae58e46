use std::{
    collections::{
        BTreeMap,
        HashMap,
    },
    path::{
        Path,
        PathBuf,
    },
    sync::RwLock,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use super::category::Category;
use crate::{
    core::{
        models::{
            Insertion,
            Line,
            NewWord,
            Story,
            StoryStatus,
            StorySummary,
            Timestamp,
            Word,
        },
        TadokuError,
    },
    persistence::{
        load_json_from,
        save_json_to,
    },
};

/// Vocabulary persistence as the pipeline sees it.
pub trait VocabStore: Send + Sync {
    fn find_by_base_form(&self, base_form: &str) -> Result<Option<Word>, TadokuError>;

    /// Inserts every staged record whose base form is absent and reports the owning id of each,
    /// in input order. Atomic per call: concurrent batches never create two records for one base
    /// form.
    fn insert_batch(
        &self,
        staged: Vec<NewWord>,
        rank: i64,
        countdown: u32,
        date_added: Timestamp,
    ) -> Result<Vec<Insertion>, TadokuError>;

    /// Every record, in id order.
    fn all_words(&self) -> Result<Vec<Word>, TadokuError>;

    fn get_word(&self, id: i64) -> Result<Word, TadokuError>;

    /// Overwrites the drill statistics of an existing record.
    fn save_word_stats(&self, word: &Word) -> Result<(), TadokuError>;

    /// ORs `bits` into the record's category. Returns whether any bit was new.
    fn merge_category(&self, id: i64, bits: Category) -> Result<bool, TadokuError>;

    fn word_count(&self) -> Result<usize, TadokuError>;
}

pub trait StoryStore: Send + Sync {
    /// Stores the story under a fresh id, ignoring `story.id`.
    fn insert_story(&self, story: Story) -> Result<i64, TadokuError>;

    fn get_story(&self, id: i64) -> Result<Story, TadokuError>;

    /// Swaps all lines of a story at once.
    fn replace_lines(&self, id: i64, lines: Vec<Line>) -> Result<(), TadokuError>;

    fn set_status(&self, id: i64, status: StoryStatus) -> Result<(), TadokuError>;

    fn list_stories(&self) -> Result<Vec<StorySummary>, TadokuError>;
}

#[derive(Serialize, Deserialize, Default)]
struct StoreSnapshot {
    words: Vec<Word>,
    stories: Vec<Story>,
}

#[derive(Default)]
struct StoreState {
    words: BTreeMap<i64, Word>,
    by_base_form: HashMap<String, i64>,
    stories: BTreeMap<i64, Story>,
    next_word_id: i64,
    next_story_id: i64,
}

impl StoreState {
    fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, TadokuError> {
        let mut state = StoreState::default();
        for word in snapshot.words {
            if state.by_base_form.insert(word.base_form.clone(), word.id).is_some() {
                return Err(TadokuError::MalformedData {
                    key: word.base_form,
                    reason: "duplicate base form in snapshot".to_string(),
                });
            }
            state.words.insert(word.id, word);
        }
        for story in snapshot.stories {
            state.stories.insert(story.id, story);
        }
        state.next_word_id = state.words.keys().next_back().copied().unwrap_or(0) + 1;
        state.next_story_id = state.stories.keys().next_back().copied().unwrap_or(0) + 1;
        Ok(state)
    }

    fn word_mut(&mut self, id: i64) -> Result<&mut Word, TadokuError> {
        self.words.get_mut(&id).ok_or(TadokuError::WordNotFound(id))
    }

    fn story_mut(&mut self, id: i64) -> Result<&mut Story, TadokuError> {
        self.stories.get_mut(&id).ok_or(TadokuError::StoryNotFound(id))
    }
}

/// In-process store behind one lock, optionally backed by a JSON snapshot file.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: RwLock::new(StoreState {
                next_word_id: 1,
                next_story_id: 1,
                ..Default::default()
            }),
            path: None,
        }
    }

    /// Loads the snapshot at `path`, or starts empty if there is none yet.
    pub fn open(path: &Path) -> Result<Self, TadokuError> {
        let snapshot: StoreSnapshot = load_json_from(path)?;
        let state = StoreState::from_snapshot(snapshot)?;
        info!(
            path = %path.display(),
            words = state.words.len(),
            stories = state.stories.len(),
            "opened vocabulary store"
        );
        Ok(MemoryStore { state: RwLock::new(state), path: Some(path.to_path_buf()) })
    }

    pub fn save(&self) -> Result<(), TadokuError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let state = self.state.read()?;
        let snapshot = StoreSnapshot {
            words: state.words.values().cloned().collect(),
            stories: state.stories.values().cloned().collect(),
        };
        save_json_to(&snapshot, path)
    }
}

impl VocabStore for MemoryStore {
    fn find_by_base_form(&self, base_form: &str) -> Result<Option<Word>, TadokuError> {
        let state = self.state.read()?;
        Ok(state.by_base_form.get(base_form).and_then(|id| state.words.get(id)).cloned())
    }

    fn insert_batch(
        &self,
        staged: Vec<NewWord>,
        rank: i64,
        countdown: u32,
        date_added: Timestamp,
    ) -> Result<Vec<Insertion>, TadokuError> {
        let mut state = self.state.write()?;
        let mut insertions = Vec::with_capacity(staged.len());

        for new_word in staged {
            if let Some(&id) = state.by_base_form.get(&new_word.base_form) {
                insertions.push(Insertion { id, created: false });
                continue;
            }
            let id = state.next_word_id;
            state.next_word_id += 1;
            state.by_base_form.insert(new_word.base_form.clone(), id);
            state.words.insert(id, new_word.into_word(id, rank, countdown, date_added));
            insertions.push(Insertion { id, created: true });
        }
        Ok(insertions)
    }

    fn all_words(&self) -> Result<Vec<Word>, TadokuError> {
        Ok(self.state.read()?.words.values().cloned().collect())
    }

    fn get_word(&self, id: i64) -> Result<Word, TadokuError> {
        self.state.read()?.words.get(&id).cloned().ok_or(TadokuError::WordNotFound(id))
    }

    fn save_word_stats(&self, word: &Word) -> Result<(), TadokuError> {
        let mut state = self.state.write()?;
        let stored = state.word_mut(word.id)?;
        stored.countdown = word.countdown;
        stored.drill_count = word.drill_count;
        stored.date_marked = word.date_marked;
        stored.date_last_drill = word.date_last_drill;
        stored.date_last_wrong = word.date_last_wrong;
        Ok(())
    }

    fn merge_category(&self, id: i64, bits: Category) -> Result<bool, TadokuError> {
        let mut state = self.state.write()?;
        let stored = state.word_mut(id)?;
        let merged = stored.category | bits;
        let changed = merged != stored.category;
        stored.category = merged;
        Ok(changed)
    }

    fn word_count(&self) -> Result<usize, TadokuError> {
        Ok(self.state.read()?.words.len())
    }
}

impl StoryStore for MemoryStore {
    fn insert_story(&self, mut story: Story) -> Result<i64, TadokuError> {
        let mut state = self.state.write()?;
        let id = state.next_story_id;
        state.next_story_id += 1;
        story.id = id;
        state.stories.insert(id, story);
        Ok(id)
    }

    fn get_story(&self, id: i64) -> Result<Story, TadokuError> {
        self.state.read()?.stories.get(&id).cloned().ok_or(TadokuError::StoryNotFound(id))
    }

    fn replace_lines(&self, id: i64, lines: Vec<Line>) -> Result<(), TadokuError> {
        self.state.write()?.story_mut(id)?.lines = lines;
        Ok(())
    }

    fn set_status(&self, id: i64, status: StoryStatus) -> Result<(), TadokuError> {
        self.state.write()?.story_mut(id)?.status = status;
        Ok(())
    }

    fn list_stories(&self) -> Result<Vec<StorySummary>, TadokuError> {
        Ok(self.state.read()?.stories.values().map(StorySummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Arc,
        thread,
    };

    use super::*;
    use crate::core::models::RecordKind;

    fn staged(base_form: &str) -> NewWord {
        NewWord {
            base_form: base_form.to_string(),
            kind: RecordKind::Word,
            category: Category::empty(),
            definitions: "[]".to_string(),
        }
    }

    #[test]
    fn test_insert_if_absent() {
        let store = MemoryStore::new();
        let first = store.insert_batch(vec![staged("桃"), staged("李")], 0, 7, 10).unwrap();
        assert_eq!(
            first,
            vec![Insertion { id: 1, created: true }, Insertion { id: 2, created: true }]
        );

        let second = store.insert_batch(vec![staged("李"), staged("梨")], 0, 7, 20).unwrap();
        assert_eq!(
            second,
            vec![Insertion { id: 2, created: false }, Insertion { id: 3, created: true }]
        );
        assert_eq!(store.word_count().unwrap(), 3);
        assert_eq!(store.find_by_base_form("李").unwrap().unwrap().date_added, 10);
    }

    #[test]
    fn test_concurrent_batches_never_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.insert_batch(vec![staged("桃"), staged("李")], 0, 7, 0).unwrap()
                })
            })
            .collect();

        let created: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap().iter().filter(|i| i.created).count())
            .sum();
        assert_eq!(created, 2);
        assert_eq!(store.word_count().unwrap(), 2);
    }

    #[test]
    fn test_merge_category_only_adds() {
        let store = MemoryStore::new();
        let id = store.insert_batch(vec![staged("書く")], 0, 7, 0).unwrap()[0].id;

        assert!(store.merge_category(id, Category::GODAN_KU).unwrap());
        assert!(!store.merge_category(id, Category::GODAN_KU).unwrap());
        assert!(!store.merge_category(id, Category::empty()).unwrap());
        assert_eq!(store.get_word(id).unwrap().category, Category::GODAN_KU);

        assert!(matches!(
            store.merge_category(99, Category::KANJI),
            Err(TadokuError::WordNotFound(99))
        ));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");

        let store = MemoryStore::open(&path).unwrap();
        store.insert_batch(vec![staged("桃")], 0, 7, 5).unwrap();
        let story_id = store
            .insert_story(Story {
                id: 0,
                title: "すもも".to_string(),
                link: String::new(),
                status: StoryStatus::NeverRead,
                date_added: 5,
                content: "すもももももももものうち".to_string(),
                lines: Vec::new(),
            })
            .unwrap();
        store.set_status(story_id, StoryStatus::Current).unwrap();
        store.save().unwrap();

        let reopened = MemoryStore::open(&path).unwrap();
        assert_eq!(reopened.word_count().unwrap(), 1);
        assert_eq!(reopened.get_story(story_id).unwrap().status, StoryStatus::Current);

        // ids keep counting from the snapshot
        let next = reopened.insert_batch(vec![staged("李")], 0, 7, 6).unwrap();
        assert_eq!(next[0].id, 2);
    }
}
