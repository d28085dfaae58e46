use std::{
    sync::Arc,
    time::Instant,
};

use serde::Serialize;
use tracing::info;

use super::{
    config::Config,
    models::{
        now,
        Line,
        Story,
        StoryStatus,
        StorySummary,
        Word,
    },
    utils::distinct_kanji,
    TadokuError,
};
use crate::{
    dictionary::{
        self,
        DictionaryDataset,
        DictionaryEntry,
        KanjiCharacter,
        LookupCache,
        SearchResults,
    },
    drill::{
        self,
        DrillOutcome,
        DrillRequest,
        DrillSelection,
    },
    segmentation::{
        Analyzer,
        Classifier,
        VibratoAnalyzer,
    },
    story::split_content,
    vocabulary::{
        reclassify_all,
        ReclassifyReport,
        StoryStore,
        VocabStore,
        VocabularyExtractor,
    },
};

/// Lines of one text with resolved word/kanji ids, and how many records they created.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct StoryExtraction {
    pub lines: Vec<Line>,
    pub new_count: usize,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedStory {
    pub id: i64,
    pub new_count: usize,
}

/// Everything the operations share for the life of the process.
pub struct LanguageTools {
    pub analyzer: Arc<dyn Analyzer>,
    pub dataset: Arc<DictionaryDataset>,
    pub lookup_cache: LookupCache,
    pub classifier: Classifier,
    pub config: Config,
}

impl LanguageTools {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        dataset: Arc<DictionaryDataset>,
        config: Config,
    ) -> Self {
        let lookup_cache = LookupCache::new(Arc::clone(&dataset), config.max_entries_per_word);
        LanguageTools { analyzer, dataset, lookup_cache, classifier: Classifier::default(), config }
    }

    /// Loads the dictionary dataset and the analyzer dictionary named by `config`.
    pub fn load(config: Config) -> Result<Self, TadokuError> {
        let dataset = Arc::new(DictionaryDataset::load(&config.dictionary_archive)?);
        let analyzer: Arc<dyn Analyzer> =
            Arc::new(VibratoAnalyzer::from_path(&config.tokenizer_dictionary)?);
        Ok(Self::new(analyzer, dataset, config))
    }

    /// Analyzes `content` line by line and persists every new word and kanji it contains.
    pub fn extract_vocabulary(
        &self,
        store: &dyn VocabStore,
        content: &str,
    ) -> Result<StoryExtraction, TadokuError> {
        let start = Instant::now();
        let extractor = VocabularyExtractor::new(store, &self.lookup_cache, &self.config);
        let timestamp = now();

        let mut extraction = StoryExtraction::default();
        for raw in split_content(content) {
            let tokens = self.analyzer.analyze(&raw.content)?;
            let classes = self.classifier.classify_line(&tokens);
            let kanji = distinct_kanji(&raw.content);

            let line = extractor.extract_line(&tokens, &classes, &kanji, timestamp)?;
            extraction.new_count += line.new_count;
            extraction.lines.push(Line {
                content: raw.content,
                timestamp: raw.timestamp,
                words: line.words,
                kanji: line.kanji,
            });
        }

        info!(
            lines = extraction.lines.len(),
            new = extraction.new_count,
            elapsed = ?start.elapsed(),
            "extracted vocabulary"
        );
        Ok(extraction)
    }

    pub fn search(&self, query: &str) -> SearchResults {
        dictionary::search(&self.dataset, query, self.config.search_result_limit)
    }

    pub fn search_by_part_of_speech(&self, tag: &str) -> Vec<DictionaryEntry> {
        dictionary::search_by_part_of_speech(&self.dataset, tag)
    }

    pub fn lookup_kanji(&self, text: &str) -> Vec<KanjiCharacter> {
        self.dataset.kanji_characters(&distinct_kanji(text))
    }

    pub fn select_drill_words(
        &self,
        store: &dyn VocabStore,
        request: &DrillRequest,
    ) -> Result<DrillSelection, TadokuError> {
        let words = store.all_words()?;
        Ok(drill::select(words, request, now(), self.config.drill_cooldown_secs))
    }

    pub fn reclassify(&self, store: &dyn VocabStore) -> Result<ReclassifyReport, TadokuError> {
        reclassify_all(store)
    }

    pub fn record_drill_result(
        &self,
        store: &dyn VocabStore,
        word_id: i64,
        outcome: DrillOutcome,
    ) -> Result<Word, TadokuError> {
        drill::record_result(store, &self.config, word_id, outcome, now())
    }

    pub fn mark_word(
        &self,
        store: &dyn VocabStore,
        word_id: i64,
        countdown: u32,
    ) -> Result<Word, TadokuError> {
        drill::mark(store, &self.config, word_id, countdown, now())
    }

    pub fn create_story<S: VocabStore + StoryStore>(
        &self,
        store: &S,
        title: &str,
        link: &str,
        content: &str,
    ) -> Result<CreatedStory, TadokuError> {
        let extraction = self.extract_vocabulary(store, content)?;
        let id = store.insert_story(Story {
            id: 0,
            title: title.to_string(),
            link: link.to_string(),
            status: StoryStatus::NeverRead,
            date_added: now(),
            content: content.to_string(),
            lines: extraction.lines,
        })?;
        info!(id, title, new = extraction.new_count, "created story");
        Ok(CreatedStory { id, new_count: extraction.new_count })
    }

    /// Re-runs extraction over the stored content and swaps in the new lines.
    pub fn retokenize_story<S: VocabStore + StoryStore>(
        &self,
        store: &S,
        story_id: i64,
    ) -> Result<usize, TadokuError> {
        let story = store.get_story(story_id)?;
        let extraction = self.extract_vocabulary(store, &story.content)?;
        store.replace_lines(story_id, extraction.lines)?;
        Ok(extraction.new_count)
    }

    pub fn set_story_status(
        &self,
        store: &dyn StoryStore,
        story_id: i64,
        status: StoryStatus,
    ) -> Result<(), TadokuError> {
        store.set_status(story_id, status)
    }

    pub fn list_stories(&self, store: &dyn StoryStore) -> Result<Vec<StorySummary>, TadokuError> {
        store.list_stories()
    }

    pub fn get_story(&self, store: &dyn StoryStore, story_id: i64) -> Result<Story, TadokuError> {
        store.get_story(story_id)
    }
}
