use std::{
    collections::HashMap,
    sync::{
        Arc,
        RwLock,
    },
};

use super::{
    dataset::DictionaryDataset,
    entry::DictionaryEntry,
};
use crate::core::{
    utils::has_kanji,
    TadokuError,
};

/// Memoizes base form -> entries and base form -> serialized entries for the process lifetime.
///
/// Misses are cached as empty lists. Nothing is evicted: the key space is bounded by the
/// distinct base forms seen, and the dictionary behind it is finite.
pub struct LookupCache {
    dataset: Arc<DictionaryDataset>,
    max_entries: usize,
    entries: RwLock<HashMap<String, Arc<[DictionaryEntry]>>>,
    serialized: RwLock<HashMap<String, Arc<str>>>,
}

impl LookupCache {
    pub fn new(dataset: Arc<DictionaryDataset>, max_entries: usize) -> Self {
        LookupCache {
            dataset,
            max_entries,
            entries: RwLock::new(HashMap::new()),
            serialized: RwLock::new(HashMap::new()),
        }
    }

    pub fn dataset(&self) -> &Arc<DictionaryDataset> {
        &self.dataset
    }

    pub fn lookup(&self, base_form: &str) -> Result<Arc<[DictionaryEntry]>, TadokuError> {
        if let Some(hit) = self.entries.read()?.get(base_form) {
            return Ok(Arc::clone(hit));
        }

        // Two racing misses compute the same list; the second insert is a no-op.
        let computed: Arc<[DictionaryEntry]> = self.compute(base_form).into();
        let mut entries = self.entries.write()?;
        let slot = entries.entry(base_form.to_string()).or_insert(computed);
        Ok(Arc::clone(slot))
    }

    /// JSON form of `lookup(base_form)`, stored as the word's definitions.
    pub fn serialized(&self, base_form: &str) -> Result<Arc<str>, TadokuError> {
        if let Some(hit) = self.serialized.read()?.get(base_form) {
            return Ok(Arc::clone(hit));
        }

        let entries = self.lookup(base_form)?;
        let computed: Arc<str> = serde_json::to_string(&*entries)?.into();
        let mut serialized = self.serialized.write()?;
        let slot = serialized.entry(base_form.to_string()).or_insert(computed);
        Ok(Arc::clone(slot))
    }

    /// Number of cached base forms, misses included.
    pub fn len(&self) -> Result<usize, TadokuError> {
        Ok(self.entries.read()?.len())
    }

    fn compute(&self, base_form: &str) -> Vec<DictionaryEntry> {
        let found = if has_kanji(base_form) {
            self.dataset.entries_by_kanji_spelling(base_form)
        } else {
            self.dataset.entries_by_reading(base_form)
        };
        found.into_iter().take(self.max_entries).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::dataset::tests::entry;

    fn cache() -> LookupCache {
        let mut entries = vec![
            entry(1, &["桃"], &["もも"], &["n"]),
            entry(2, &["腿", "股"], &["もも"], &["n"]),
        ];
        for id in 10..30 {
            entries.push(entry(id, &[], &["かみ"], &["n"]));
        }
        LookupCache::new(Arc::new(DictionaryDataset::from_parts(entries, Vec::new())), 8)
    }

    #[test]
    fn test_kanji_base_form_searches_spellings() {
        let cache = cache();
        let found = cache.lookup("桃").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_kana_base_form_searches_readings() {
        let cache = cache();
        let ids: Vec<u64> = cache.lookup("もも").unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_truncates_and_caches_misses() {
        let cache = cache();
        assert_eq!(cache.lookup("かみ").unwrap().len(), 8);

        assert!(cache.lookup("ない").unwrap().is_empty());
        assert!(cache.lookup("ない").unwrap().is_empty());
        assert_eq!(cache.len().unwrap(), 2);
    }

    #[test]
    fn test_poisoned_cache_reports_error() {
        let cache = cache();
        cache.lookup("桃").unwrap();

        std::thread::scope(|scope| {
            let poisoner = scope.spawn(|| {
                let _guard = cache.entries.write().unwrap();
                panic!("writer died");
            });
            assert!(poisoner.join().is_err());
        });

        assert!(matches!(cache.len(), Err(TadokuError::Store(_))));
        assert!(cache.lookup("桃").is_err());
    }

    #[test]
    fn test_serialized_matches_entries() {
        let cache = cache();
        let json = cache.serialized("桃").unwrap();
        let decoded: Vec<DictionaryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, cache.lookup("桃").unwrap().to_vec());

        assert_eq!(&*cache.serialized("ない").unwrap(), "[]");
    }
}
