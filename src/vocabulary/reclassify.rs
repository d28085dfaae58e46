use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::{
    category::{
        categorize,
        Category,
    },
    store::VocabStore,
};
use crate::{
    core::{
        models::Word,
        TadokuError,
    },
    dictionary::DictionaryEntry,
};

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReclassifyReport {
    pub examined: usize,
    pub updated: usize,
}

/// Recomputes every record's category from its stored definitions and merges the result in.
/// Bits are only ever added.
pub fn reclassify_all(store: &dyn VocabStore) -> Result<ReclassifyReport, TadokuError> {
    let start = Instant::now();
    let words = store.all_words()?;

    let computed: Vec<(i64, Category)> = words
        .par_iter()
        .map(|word| category_from_definitions(word).map(|category| (word.id, category)))
        .collect::<Result<_, TadokuError>>()?;

    let mut updated = 0;
    for (id, bits) in computed {
        if store.merge_category(id, bits)? {
            updated += 1;
        }
    }

    let report = ReclassifyReport { examined: words.len(), updated };
    info!(
        examined = report.examined,
        updated = report.updated,
        elapsed = ?start.elapsed(),
        "reclassified vocabulary"
    );
    Ok(report)
}

fn category_from_definitions(word: &Word) -> Result<Category, TadokuError> {
    if word.is_kanji() {
        return Ok(Category::KANJI);
    }
    if word.definitions.trim().is_empty() {
        return Ok(categorize(&word.base_form, &[]));
    }

    let entries: Vec<DictionaryEntry> =
        serde_json::from_str(&word.definitions).map_err(|e| TadokuError::MalformedData {
            key: word.base_form.clone(),
            reason: e.to_string(),
        })?;
    Ok(categorize(&word.base_form, &entries))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        core::models::{
            NewWord,
            RecordKind,
        },
        dictionary::dataset::tests::entry,
        vocabulary::store::MemoryStore,
    };

    fn staged(base_form: &str, category: Category, entries: &[DictionaryEntry]) -> NewWord {
        NewWord {
            base_form: base_form.to_string(),
            kind: RecordKind::Word,
            category,
            definitions: serde_json::to_string(entries).unwrap(),
        }
    }

    #[test]
    fn test_sweep_adds_missing_bits() {
        let store = MemoryStore::new();
        store
            .insert_batch(
                vec![
                    staged("読む", Category::empty(), &[entry(1, &["読む"], &["よむ"], &["v5m"])]),
                    staged("テレビ", Category::KATAKANA, &[]),
                ],
                0,
                7,
                0,
            )
            .unwrap();

        let report = reclassify_all(&store).unwrap();
        assert_eq!(report, ReclassifyReport { examined: 2, updated: 1 });
        assert_eq!(
            store.find_by_base_form("読む").unwrap().unwrap().category,
            Category::GODAN_MU
        );

        // second run has nothing left to add
        assert_eq!(reclassify_all(&store).unwrap().updated, 0);
    }

    #[test]
    fn test_malformed_definitions_fail_the_sweep() {
        let store = MemoryStore::new();
        let mut broken = staged("壊れ", Category::empty(), &[]);
        broken.definitions = "{not json".to_string();
        store.insert_batch(vec![broken], 0, 7, 0).unwrap();

        assert!(matches!(
            reclassify_all(&store),
            Err(TadokuError::MalformedData { ref key, .. }) if key == "壊れ"
        ));
    }

    const POS_TAGS: &[&str] = &["v1", "v5k", "v5r", "v5s", "n", "adj-i", "exp", "v5u-s"];

    proptest! {
        #[test]
        fn sweep_never_clears_bits(
            initial in 0u32..4096,
            tags in prop::collection::vec(prop::sample::select(POS_TAGS.to_vec()), 0..4),
        ) {
            let store = MemoryStore::new();
            let before = Category::from_bits_retain(initial);
            let entries = vec![entry(1, &[], &["よむ"], &tags)];
            let id = store
                .insert_batch(vec![staged("よむ", before, &entries)], 0, 7, 0)
                .unwrap()[0]
                .id;

            reclassify_all(&store).unwrap();
            let after = store.get_word(id).unwrap().category;
            prop_assert!(after.contains(before));
            prop_assert!(after.contains(categorize("よむ", &entries)));
        }
    }
}
