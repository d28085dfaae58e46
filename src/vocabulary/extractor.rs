use std::collections::HashSet;

use tracing::debug;

use super::{
    category::{
        categorize,
        Category,
    },
    store::VocabStore,
};
use crate::{
    core::{
        models::{
            LineKanji,
            LineWord,
            NewWord,
            RecordKind,
            Timestamp,
        },
        utils::{
            has_kana,
            has_kanji,
            is_single_kanji,
        },
        Config,
        TadokuError,
    },
    dictionary::LookupCache,
    segmentation::{
        Token,
        WordClass,
    },
};

/// Word and kanji references of one line plus how many records the line created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineExtraction {
    pub words: Vec<LineWord>,
    pub kanji: Vec<LineKanji>,
    pub new_count: usize,
}

enum Slot {
    Existing(i64),
    Staged(usize),
}

struct Candidate<'t> {
    token: &'t Token,
    class: WordClass,
}

pub struct VocabularyExtractor<'a> {
    store: &'a dyn VocabStore,
    cache: &'a LookupCache,
    config: &'a Config,
}

impl<'a> VocabularyExtractor<'a> {
    pub fn new(store: &'a dyn VocabStore, cache: &'a LookupCache, config: &'a Config) -> Self {
        VocabularyExtractor { store, cache, config }
    }

    /// `classes[i]` is the label of `tokens[i]`; `kanji` are the line's distinct kanji.
    pub fn extract_line(
        &self,
        tokens: &[Token],
        classes: &[WordClass],
        kanji: &[String],
        now: Timestamp,
    ) -> Result<LineExtraction, TadokuError> {
        let candidates = unique_candidates(tokens, classes);

        let mut staged: Vec<NewWord> = Vec::new();
        let mut word_slots: Vec<(Candidate, Category, Slot)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let base_form = candidate.token.base_form.as_str();
            match self.store.find_by_base_form(base_form)? {
                Some(existing) => {
                    word_slots.push((candidate, existing.category, Slot::Existing(existing.id)));
                }
                None => {
                    let entries = self.cache.lookup(base_form)?;
                    let category = categorize(base_form, &entries);
                    staged.push(NewWord {
                        base_form: base_form.to_string(),
                        kind: RecordKind::Word,
                        category,
                        definitions: self.cache.serialized(base_form)?.to_string(),
                    });
                    word_slots.push((candidate, category, Slot::Staged(staged.len() - 1)));
                }
            }
        }

        let mut kanji_slots: Vec<(&str, Slot)> = Vec::with_capacity(kanji.len());
        let mut seen_kanji: HashSet<&str> = HashSet::new();
        for literal in kanji {
            if !seen_kanji.insert(literal.as_str()) {
                continue;
            }
            match self.store.find_by_base_form(literal)? {
                Some(existing) => kanji_slots.push((literal.as_str(), Slot::Existing(existing.id))),
                None => {
                    let definitions = match self.cache.dataset().kanji_character(literal) {
                        Some(character) => serde_json::to_string(character)?,
                        None => String::new(),
                    };
                    staged.push(NewWord {
                        base_form: literal.clone(),
                        kind: RecordKind::Kanji,
                        category: Category::KANJI,
                        definitions,
                    });
                    kanji_slots.push((literal.as_str(), Slot::Staged(staged.len() - 1)));
                }
            }
        }

        let insertions = if staged.is_empty() {
            Vec::new()
        } else {
            self.store.insert_batch(
                staged,
                self.config.initial_rank,
                self.config.initial_countdown,
                now,
            )?
        };

        let resolve = |slot: &Slot| -> Result<i64, TadokuError> {
            match slot {
                Slot::Existing(id) => Ok(*id),
                Slot::Staged(idx) => insertions.get(*idx).map(|insertion| insertion.id).ok_or_else(
                    || TadokuError::Store(format!("batch insert returned no id for record {}", idx)),
                ),
            }
        };

        let mut words = Vec::with_capacity(word_slots.len());
        for (candidate, category, slot) in &word_slots {
            let word_id = resolve(slot)?;
            if matches!(slot, Slot::Staged(_)) {
                debug!(base_form = %candidate.token.base_form, word_id, ?category, "new word");
            }
            words.push(LineWord {
                base_form: candidate.token.base_form.clone(),
                surface: candidate.token.surface.clone(),
                pos: candidate.class,
                category: *category,
                word_id,
            });
        }

        let mut line_kanji = Vec::with_capacity(kanji_slots.len());
        for (literal, slot) in &kanji_slots {
            let kanji_id = resolve(slot)?;
            if matches!(slot, Slot::Staged(_)) {
                debug!(%literal, kanji_id, "new kanji");
            }
            line_kanji.push(LineKanji { literal: literal.to_string(), kanji_id });
        }

        Ok(LineExtraction {
            words,
            kanji: line_kanji,
            new_count: insertions.iter().filter(|insertion| insertion.created).count(),
        })
    }
}

/// Tokens that may become words: classified, script-bearing, not a lone kanji, first per base
/// form.
fn unique_candidates<'t>(tokens: &'t [Token], classes: &[WordClass]) -> Vec<Candidate<'t>> {
    let mut seen: HashSet<&'t str> = HashSet::new();
    let mut candidates = Vec::new();

    for (token, &class) in tokens.iter().zip(classes) {
        let base_form = token.base_form.as_str();
        if class.is_discard()
            || !(has_kana(base_form) || has_kanji(base_form))
            || is_single_kanji(base_form)
            || !seen.insert(base_form)
        {
            continue;
        }
        candidates.push(Candidate { token, class });
    }
    candidates
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        core::{
            models::{
                Insertion,
                Word,
            },
            utils::distinct_kanji,
        },
        dictionary::{
            dataset::tests::{
                entry,
                kanji_char,
            },
            DictionaryDataset,
        },
        segmentation::Classifier,
        vocabulary::store::MemoryStore,
    };

    fn tok(surface: &str, features: &str) -> Token {
        Token::from_features(surface, features)
    }

    fn cache() -> LookupCache {
        let dataset = DictionaryDataset::from_parts(
            vec![
                entry(1, &["李"], &["すもも"], &["n"]),
                entry(2, &["桃"], &["もも"], &["n"]),
                entry(3, &["読む"], &["よむ"], &["v5m", "vt"]),
                entry(4, &["内"], &["うち"], &["n"]),
            ],
            vec![kanji_char("読"), kanji_char("本")],
        );
        LookupCache::new(Arc::new(dataset), 8)
    }

    fn sumomo() -> Vec<Token> {
        vec![
            tok("すもも", "名詞,一般,*,*,*,*,すもも,スモモ,スモモ"),
            tok("も", "助詞,係助詞,*,*,*,*,も,モ,モ"),
            tok("もも", "名詞,一般,*,*,*,*,もも,モモ,モモ"),
            tok("も", "助詞,係助詞,*,*,*,*,も,モ,モ"),
            tok("もも", "名詞,一般,*,*,*,*,もも,モモ,モモ"),
            tok("の", "助詞,連体化,*,*,*,*,の,ノ,ノ"),
            tok("うち", "名詞,非自立,副詞可能,*,*,*,うち,ウチ,ウチ"),
        ]
    }

    fn extract(
        store: &MemoryStore,
        cache: &LookupCache,
        tokens: &[Token],
        text: &str,
    ) -> LineExtraction {
        let config = Config::default();
        let classes = Classifier::default().classify_line(tokens);
        VocabularyExtractor::new(store, cache, &config)
            .extract_line(tokens, &classes, &distinct_kanji(text), 100)
            .unwrap()
    }

    #[test]
    fn test_sumomo_line() {
        let store = MemoryStore::new();
        let cache = cache();
        let text = "すもももももももものうち";
        let extraction = extract(&store, &cache, &sumomo(), text);

        assert!(extraction.kanji.is_empty());
        let base_forms: Vec<&str> =
            extraction.words.iter().map(|w| w.base_form.as_str()).collect();
        assert_eq!(base_forms, vec!["すもも", "も", "もも", "の", "うち"]);
        assert!(base_forms.iter().all(|b| text.contains(b)));
        assert_eq!(extraction.new_count, 5);
        assert_eq!(store.word_count().unwrap(), 5);

        let momo = store.find_by_base_form("もも").unwrap().unwrap();
        assert_eq!(momo.countdown, 7);
        assert_eq!(momo.date_added, 100);
        assert!(momo.definitions.contains("桃"));
    }

    #[test]
    fn test_reextraction_is_idempotent() {
        let store = MemoryStore::new();
        let cache = cache();
        let text = "本を読む";
        let tokens = vec![
            tok("本", "名詞,一般,*,*,*,*,本,ホン,ホン"),
            tok("を", "助詞,格助詞,一般,*,*,*,を,ヲ,ヲ"),
            tok("読む", "動詞,自立,*,*,五段・マ行,基本形,読む,ヨム,ヨム"),
        ];

        let first = extract(&store, &cache, &tokens, text);
        let second = extract(&store, &cache, &tokens, text);

        assert_eq!(first.new_count, 4); // を, 読む, 本, 読
        assert_eq!(second.new_count, 0);
        assert_eq!(first.words, second.words);
        assert_eq!(first.kanji, second.kanji);
        assert_eq!(store.word_count().unwrap(), 4);
    }

    #[test]
    fn test_single_kanji_goes_through_kanji_path() {
        let store = MemoryStore::new();
        let cache = cache();
        let text = "本を読む";
        let tokens = vec![
            tok("本", "名詞,一般,*,*,*,*,本,ホン,ホン"),
            tok("を", "助詞,格助詞,一般,*,*,*,を,ヲ,ヲ"),
            tok("読む", "動詞,自立,*,*,五段・マ行,基本形,読む,ヨム,ヨム"),
        ];
        let extraction = extract(&store, &cache, &tokens, text);

        assert!(extraction.words.iter().all(|w| w.base_form != "本"));
        let literals: Vec<&str> = extraction.kanji.iter().map(|k| k.literal.as_str()).collect();
        assert_eq!(literals, vec!["本", "読"]);

        let hon = store.find_by_base_form("本").unwrap().unwrap();
        assert!(hon.is_kanji());
        assert_eq!(hon.category, Category::KANJI);

        let yomu = store.find_by_base_form("読む").unwrap().unwrap();
        assert_eq!(yomu.category, Category::GODAN_MU);
        let yomu_ref = extraction.words.iter().find(|w| w.base_form == "読む").unwrap();
        assert_eq!(yomu_ref.pos, WordClass::Verb);
        assert_eq!(yomu_ref.word_id, yomu.id);
    }

    #[test]
    fn test_symbols_and_numerals_are_skipped() {
        let store = MemoryStore::new();
        let cache = cache();
        let tokens = vec![
            tok("3", "名詞,数,*,*,*,*,3,サン,サン"),
            tok("テレビ", "名詞,一般,*,*,*,*,テレビ,テレビ,テレビ"),
            tok("。", "記号,句点,*,*,*,*,。,。,。"),
        ];
        let extraction = extract(&store, &cache, &tokens, "3テレビ。");
        assert_eq!(extraction.words.len(), 1);
        assert_eq!(extraction.words[0].category, Category::KATAKANA);
    }

    /// Store that never sees existing records on lookup, as when another ingestion inserts
    /// between the check and the batch insert.
    struct StaleReads<'s>(&'s MemoryStore);

    impl VocabStore for StaleReads<'_> {
        fn find_by_base_form(&self, _: &str) -> Result<Option<Word>, TadokuError> {
            Ok(None)
        }

        fn insert_batch(
            &self,
            staged: Vec<NewWord>,
            rank: i64,
            countdown: u32,
            date_added: Timestamp,
        ) -> Result<Vec<Insertion>, TadokuError> {
            self.0.insert_batch(staged, rank, countdown, date_added)
        }

        fn all_words(&self) -> Result<Vec<Word>, TadokuError> {
            self.0.all_words()
        }

        fn get_word(&self, id: i64) -> Result<Word, TadokuError> {
            self.0.get_word(id)
        }

        fn save_word_stats(&self, word: &Word) -> Result<(), TadokuError> {
            self.0.save_word_stats(word)
        }

        fn merge_category(&self, id: i64, bits: Category) -> Result<bool, TadokuError> {
            self.0.merge_category(id, bits)
        }

        fn word_count(&self) -> Result<usize, TadokuError> {
            self.0.word_count()
        }
    }

    #[test]
    fn test_lost_insert_race_resolves_to_existing_ids() {
        let store = MemoryStore::new();
        let cache = cache();
        let text = "すもももももももものうち";
        let first = extract(&store, &cache, &sumomo(), text);

        let config = Config::default();
        let tokens = sumomo();
        let classes = Classifier::default().classify_line(&tokens);
        let stale = StaleReads(&store);
        let raced = VocabularyExtractor::new(&stale, &cache, &config)
            .extract_line(&tokens, &classes, &distinct_kanji(text), 200)
            .unwrap();

        assert_eq!(raced.new_count, 0);
        assert_eq!(raced.words, first.words);
        assert_eq!(store.word_count().unwrap(), 5);
        assert_eq!(store.find_by_base_form("もも").unwrap().unwrap().date_added, 100);
    }

    #[test]
    fn test_concurrent_extractions_create_each_record_once() {
        let store = MemoryStore::new();
        let cache = cache();
        let text = "すもももももももものうち";
        let tokens = sumomo();

        let results: Vec<LineExtraction> = std::thread::scope(|scope| {
            let handles: Vec<_> =
                (0..8).map(|_| scope.spawn(|| extract(&store, &cache, &tokens, text))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let created: usize = results.iter().map(|r| r.new_count).sum();
        assert_eq!(created, 5);
        assert_eq!(store.word_count().unwrap(), 5);
        assert!(results.iter().all(|r| r.words == results[0].words));
    }
}
