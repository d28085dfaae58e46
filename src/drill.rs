use std::{
    fmt,
    str::FromStr,
};

use rand::seq::SliceRandom;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        models::{
            Timestamp,
            Word,
        },
        Config,
        TadokuError,
    },
    vocabulary::{
        CategoryFilter,
        VocabStore,
    },
};

/// How the eligible set is ordered before the count cap applies.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrillOrder {
    /// Store enumeration order (id order).
    #[default]
    Store,
    Random,
    /// Ascending rank, ties kept in store order.
    Rank,
}

impl FromStr for DrillOrder {
    type Err = TadokuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "store" => Ok(DrillOrder::Store),
            "random" => Ok(DrillOrder::Random),
            "rank" => Ok(DrillOrder::Rank),
            other => Err(TadokuError::Custom(format!("unknown drill order '{}'", other))),
        }
    }
}

impl fmt::Display for DrillOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrillOrder::Store => "store",
            DrillOrder::Random => "random",
            DrillOrder::Rank => "rank",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DrillRequest {
    /// Only words added within this many minutes. 0 = unlimited.
    pub recency_minutes: i64,
    /// Only words answered wrong within this many minutes. 0 = unlimited.
    pub wrong_minutes: i64,
    pub filter: String,
    /// 0 = unlimited.
    pub count: usize,
    pub order: DrillOrder,
}

impl Default for DrillRequest {
    fn default() -> Self {
        DrillRequest {
            recency_minutes: 0,
            wrong_minutes: 0,
            filter: "all".to_string(),
            count: 0,
            order: DrillOrder::Store,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DrillSelection {
    pub words: Vec<Word>,
    /// Length of `words`.
    pub count: usize,
    /// Words passing every filter, before the cap.
    pub eligible: usize,
    pub total: usize,
}

fn is_eligible(
    word: &Word,
    request: &DrillRequest,
    filter: CategoryFilter,
    now: Timestamp,
    cooldown_secs: i64,
) -> bool {
    if now - word.date_last_drill < cooldown_secs {
        return false;
    }
    if request.recency_minutes > 0
        && now - word.date_added > request.recency_minutes.saturating_mul(60)
    {
        return false;
    }
    if request.wrong_minutes > 0
        && now - word.date_last_wrong > request.wrong_minutes.saturating_mul(60)
    {
        return false;
    }
    word.countdown > 0 && filter.accepts(word.category)
}

/// Filters `words` (in store order) down to a drillable set.
pub fn select(
    words: Vec<Word>,
    request: &DrillRequest,
    now: Timestamp,
    cooldown_secs: i64,
) -> DrillSelection {
    let total = words.len();
    let filter = CategoryFilter::parse(&request.filter);

    let mut eligible: Vec<Word> = words
        .into_iter()
        .filter(|word| is_eligible(word, request, filter, now, cooldown_secs))
        .collect();
    let eligible_count = eligible.len();

    match request.order {
        DrillOrder::Store => {}
        DrillOrder::Random => eligible.shuffle(&mut rand::rng()),
        DrillOrder::Rank => eligible.sort_by_key(|word| word.rank),
    }

    if request.count > 0 && request.count < eligible.len() {
        eligible.truncate(request.count);
    }

    DrillSelection { count: eligible.len(), words: eligible, eligible: eligible_count, total }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrillOutcome {
    Correct,
    Wrong,
}

/// Correct answers spend one credit; wrong ones restore all of them.
pub fn apply_drill_result(
    word: &mut Word,
    outcome: DrillOutcome,
    now: Timestamp,
    initial_countdown: u32,
) {
    match outcome {
        DrillOutcome::Correct => {
            word.countdown = word.countdown.saturating_sub(1);
        }
        DrillOutcome::Wrong => {
            word.countdown = initial_countdown;
            word.date_last_wrong = now;
        }
    }
    word.drill_count += 1;
    word.date_last_drill = now;
}

pub fn apply_mark(word: &mut Word, countdown: u32, now: Timestamp, initial_countdown: u32) {
    word.countdown = countdown.min(initial_countdown);
    word.date_marked = now;
}

/// Loads a stored word, applies one answer to it and writes its statistics back.
pub fn record_result(
    store: &dyn VocabStore,
    config: &Config,
    word_id: i64,
    outcome: DrillOutcome,
    now: Timestamp,
) -> Result<Word, TadokuError> {
    let mut word = store.get_word(word_id)?;
    apply_drill_result(&mut word, outcome, now, config.initial_countdown);
    store.save_word_stats(&word)?;
    Ok(word)
}

pub fn mark(
    store: &dyn VocabStore,
    config: &Config,
    word_id: i64,
    countdown: u32,
    now: Timestamp,
) -> Result<Word, TadokuError> {
    let mut word = store.get_word(word_id)?;
    apply_mark(&mut word, countdown, now, config.initial_countdown);
    store.save_word_stats(&word)?;
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::models::{
            NewWord,
            RecordKind,
        },
        vocabulary::{
            Category,
            MemoryStore,
        },
    };

    const NOW: Timestamp = 1_700_000_000;
    const COOLDOWN: i64 = 3 * 60 * 60;

    fn word(id: i64, base_form: &str, category: Category, countdown: u32) -> Word {
        Word {
            id,
            base_form: base_form.to_string(),
            kind: RecordKind::Word,
            category,
            rank: 0,
            definitions: "[]".to_string(),
            countdown,
            drill_count: 0,
            date_added: NOW - 60,
            date_marked: NOW - 60,
            date_last_drill: 0,
            date_last_wrong: 0,
        }
    }

    fn ids(selection: &DrillSelection) -> Vec<i64> {
        selection.words.iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_katakana_filter() {
        let words = vec![
            word(1, "テレビ", Category::KATAKANA, 3),
            word(2, "読む", Category::GODAN_MU, 3),
        ];
        let request = DrillRequest { filter: "katakana".to_string(), ..Default::default() };
        let selection = select(words, &request, NOW, COOLDOWN);
        assert_eq!(ids(&selection), vec![1]);
        assert_eq!((selection.count, selection.eligible, selection.total), (1, 1, 2));
    }

    #[test]
    fn test_cooldown_boundary_is_inclusive() {
        let mut at_boundary = word(1, "桃", Category::empty(), 3);
        at_boundary.date_last_drill = NOW - COOLDOWN;
        let mut just_inside = word(2, "李", Category::empty(), 3);
        just_inside.date_last_drill = NOW - COOLDOWN + 1;

        let selection =
            select(vec![at_boundary, just_inside], &DrillRequest::default(), NOW, COOLDOWN);
        assert_eq!(ids(&selection), vec![1]);
    }

    #[test]
    fn test_countdown_zero_is_mastered() {
        let words = vec![word(1, "桃", Category::empty(), 0), word(2, "李", Category::empty(), 1)];
        let selection = select(words, &DrillRequest::default(), NOW, COOLDOWN);
        assert_eq!(ids(&selection), vec![2]);
    }

    #[test]
    fn test_recency_and_wrong_windows() {
        let mut old = word(1, "桃", Category::empty(), 3);
        old.date_added = NOW - 3600;
        let recent = word(2, "李", Category::empty(), 3);
        let mut missed = word(3, "梨", Category::empty(), 3);
        missed.date_last_wrong = NOW - 5 * 60;

        let words = vec![old, recent, missed];

        let by_recency = DrillRequest { recency_minutes: 30, ..Default::default() };
        assert_eq!(ids(&select(words.clone(), &by_recency, NOW, COOLDOWN)), vec![2, 3]);

        let by_wrong = DrillRequest { wrong_minutes: 10, ..Default::default() };
        assert_eq!(ids(&select(words, &by_wrong, NOW, COOLDOWN)), vec![3]);
    }

    #[test]
    fn test_unknown_filter_selects_nothing() {
        let words = vec![word(1, "桃", Category::all(), 3)];
        let request = DrillRequest { filter: "adjectives".to_string(), ..Default::default() };
        let selection = select(words, &request, NOW, COOLDOWN);
        assert!(selection.words.is_empty());
        assert_eq!(selection.total, 1);
    }

    #[test]
    fn test_count_cap_and_ordering() {
        let mut words: Vec<Word> =
            (1..=5).map(|id| word(id, &format!("語{}", id), Category::empty(), 3)).collect();
        for (w, rank) in words.iter_mut().zip([5, 1, 4, 2, 3]) {
            w.rank = rank;
        }

        let stored = DrillRequest { count: 3, ..Default::default() };
        let selection = select(words.clone(), &stored, NOW, COOLDOWN);
        assert_eq!(ids(&selection), vec![1, 2, 3]);
        assert_eq!((selection.count, selection.eligible), (3, 5));

        let ranked = DrillRequest { count: 3, order: DrillOrder::Rank, ..Default::default() };
        assert_eq!(ids(&select(words.clone(), &ranked, NOW, COOLDOWN)), vec![2, 4, 5]);

        let random = DrillRequest { order: DrillOrder::Random, ..Default::default() };
        let mut shuffled = ids(&select(words, &random, NOW, COOLDOWN));
        shuffled.sort();
        assert_eq!(shuffled, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_drill_results() {
        let mut w = word(1, "桃", Category::empty(), 1);
        apply_drill_result(&mut w, DrillOutcome::Correct, NOW, 7);
        assert_eq!((w.countdown, w.drill_count, w.date_last_drill), (0, 1, NOW));

        apply_drill_result(&mut w, DrillOutcome::Correct, NOW + 1, 7);
        assert_eq!(w.countdown, 0);

        apply_drill_result(&mut w, DrillOutcome::Wrong, NOW + 2, 7);
        assert_eq!((w.countdown, w.drill_count), (7, 3));
        assert_eq!(w.date_last_wrong, NOW + 2);

        apply_mark(&mut w, 99, NOW + 3, 7);
        assert_eq!((w.countdown, w.date_marked), (7, NOW + 3));
    }

    #[test]
    fn test_huge_windows_accept_everything() {
        let mut missed = word(1, "桃", Category::empty(), 3);
        missed.date_added = 0;
        missed.date_last_wrong = 0;

        let request = DrillRequest {
            recency_minutes: i64::MAX,
            wrong_minutes: i64::MAX,
            ..Default::default()
        };
        let selection = select(vec![missed], &request, NOW, COOLDOWN);
        assert_eq!(ids(&selection), vec![1]);
    }

    #[test]
    fn test_record_result_persists_stats() {
        let store = MemoryStore::new();
        let config = Config::default();
        let staged = NewWord {
            base_form: "桃".to_string(),
            kind: RecordKind::Word,
            category: Category::empty(),
            definitions: "[]".to_string(),
        };
        let id =
            store.insert_batch(vec![staged], 0, config.initial_countdown, NOW).unwrap()[0].id;

        let answered = record_result(&store, &config, id, DrillOutcome::Wrong, NOW + 5).unwrap();
        assert_eq!(store.get_word(id).unwrap(), answered);
        assert_eq!(answered.date_last_wrong, NOW + 5);

        let marked = mark(&store, &config, id, 2, NOW + 6).unwrap();
        assert_eq!(store.get_word(id).unwrap().countdown, 2);
        assert_eq!(marked.date_marked, NOW + 6);

        assert!(matches!(
            record_result(&store, &config, 42, DrillOutcome::Correct, NOW),
            Err(TadokuError::WordNotFound(42))
        ));
    }
}
