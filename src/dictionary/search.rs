use std::time::Instant;

use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use super::{
    dataset::DictionaryDataset,
    entry::{
        DictionaryEntry,
        KanjiCharacter,
    },
};
use crate::core::utils::{
    distinct_kanji,
    has_kanji,
    NormalizeQuery,
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub entries_start: Vec<DictionaryEntry>,
    pub count_start: usize,
    pub entries_mid: Vec<DictionaryEntry>,
    pub count_mid: usize,
    pub kanji: Vec<KanjiCharacter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Start,
    Interior,
}

struct Ranked<'a> {
    bucket: Bucket,
    shortest: usize,
    entry: &'a DictionaryEntry,
}

/// Partitions dictionary entries into start and interior matches of `query`, each sorted by
/// its shortest matching form (in chars) and capped at `limit`. Counts are taken before the cap.
pub fn search(dataset: &DictionaryDataset, query: &str, limit: usize) -> SearchResults {
    let query = query.normalize_query();
    if query.is_empty() {
        return SearchResults::default();
    }

    let start = Instant::now();
    let by_kanji = has_kanji(&query);

    let ranked: Vec<Ranked> = dataset
        .entries()
        .par_iter()
        .filter_map(|entry| {
            let forms: Vec<&str> = if by_kanji {
                entry.kanji_spelling_strs().collect()
            } else {
                entry.reading_strs().collect()
            };
            rank_entry(entry, &forms, &query)
        })
        .collect();

    let (mut starts, mut interiors): (Vec<Ranked>, Vec<Ranked>) =
        ranked.into_iter().partition(|r| r.bucket == Bucket::Start);

    starts.sort_by_key(|r| r.shortest);
    interiors.sort_by_key(|r| r.shortest);

    let count_start = starts.len();
    let count_mid = interiors.len();
    let entries_start = starts.into_iter().take(limit).map(|r| r.entry.clone()).collect();
    let entries_mid = interiors.into_iter().take(limit).map(|r| r.entry.clone()).collect();

    debug!(%query, count_start, count_mid, elapsed = ?start.elapsed(), "search");

    SearchResults {
        entries_start,
        count_start,
        entries_mid,
        count_mid,
        kanji: dataset.kanji_characters(&distinct_kanji(&query)),
    }
}

fn rank_entry<'a>(entry: &'a DictionaryEntry, forms: &[&str], query: &str) -> Option<Ranked<'a>> {
    let mut bucket = None;
    let mut shortest = usize::MAX;

    for form in forms {
        if !form.contains(query) {
            continue;
        }
        if form.starts_with(query) {
            bucket = Some(Bucket::Start);
        } else if bucket.is_none() {
            bucket = Some(Bucket::Interior);
        }
        shortest = shortest.min(form.chars().count());
    }

    bucket.map(|bucket| Ranked { bucket, shortest, entry })
}

/// Entries with at least one sense tagged `tag`, in dataset order.
pub fn search_by_part_of_speech(dataset: &DictionaryDataset, tag: &str) -> Vec<DictionaryEntry> {
    let tag = tag.trim();
    dataset.entries().par_iter().filter(|entry| entry.has_part_of_speech(tag)).cloned().collect()
}
