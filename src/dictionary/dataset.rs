use std::{
    collections::HashMap,
    fs::{
        self,
        File,
    },
    io::{
        BufReader,
        Read,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
    time::Instant,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};
use zip::ZipArchive;

use super::entry::{
    DictionaryEntry,
    KanjiCharacter,
};
use crate::core::TadokuError;

const INDEX_FILE: &str = "index.json";
const ENTRIES_FILE: &str = "entries.json";
const KANJI_FILE: &str = "kanji.json";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DatasetIndex {
    pub title: String,
    pub revision: String,
}

#[derive(Deserialize)]
struct DatasetSnapshot {
    revision: String,
    entries: Vec<DictionaryEntry>,
    kanji: Vec<KanjiCharacter>,
}

#[derive(Serialize)]
struct DatasetSnapshotRef<'a> {
    revision: &'a str,
    entries: &'a [DictionaryEntry],
    kanji: &'a [KanjiCharacter],
}

/// Bilingual dictionary plus the indexes built over it. Immutable once constructed.
#[derive(Debug, Default)]
pub struct DictionaryDataset {
    pub title: String,
    pub revision: String,
    entries: Vec<DictionaryEntry>,
    kanji: Vec<KanjiCharacter>,
    kanji_spelling_index: HashMap<String, Vec<usize>>,
    reading_index: HashMap<String, Vec<usize>>,
    kanji_by_literal: HashMap<String, usize>,
}

impl DictionaryDataset {
    pub fn new(
        title: String,
        revision: String,
        entries: Vec<DictionaryEntry>,
        kanji: Vec<KanjiCharacter>,
    ) -> Self {
        let mut kanji_spelling_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut reading_index: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            for spelling in entry.kanji_spelling_strs() {
                let slot = kanji_spelling_index.entry(spelling.to_string()).or_default();
                if slot.last() != Some(&idx) {
                    slot.push(idx);
                }
            }
            for reading in entry.reading_strs() {
                let slot = reading_index.entry(reading.to_string()).or_default();
                if slot.last() != Some(&idx) {
                    slot.push(idx);
                }
            }
        }

        let kanji_by_literal =
            kanji.iter().enumerate().map(|(idx, k)| (k.literal.clone(), idx)).collect();

        DictionaryDataset {
            title,
            revision,
            entries,
            kanji,
            kanji_spelling_index,
            reading_index,
            kanji_by_literal,
        }
    }

    pub fn from_parts(entries: Vec<DictionaryEntry>, kanji: Vec<KanjiCharacter>) -> Self {
        Self::new(String::new(), String::new(), entries, kanji)
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn kanji(&self) -> &[KanjiCharacter] {
        &self.kanji
    }

    pub fn entries_by_kanji_spelling(&self, spelling: &str) -> Vec<&DictionaryEntry> {
        self.collect_indexed(self.kanji_spelling_index.get(spelling))
    }

    pub fn entries_by_reading(&self, reading: &str) -> Vec<&DictionaryEntry> {
        self.collect_indexed(self.reading_index.get(reading))
    }

    fn collect_indexed(&self, indices: Option<&Vec<usize>>) -> Vec<&DictionaryEntry> {
        indices
            .map(|indices| indices.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    pub fn kanji_character(&self, literal: &str) -> Option<&KanjiCharacter> {
        self.kanji_by_literal.get(literal).map(|&idx| &self.kanji[idx])
    }

    /// Resolves literals to characters, skipping ones the dataset does not know.
    pub fn kanji_characters(&self, literals: &[String]) -> Vec<KanjiCharacter> {
        literals.iter().filter_map(|literal| self.kanji_character(literal)).cloned().collect()
    }

    /// Loads a zipped dataset (`index.json`, `entries.json`, `kanji.json`), going through a
    /// binary cache next to the archive when its revision still matches.
    pub fn load(archive_path: &Path) -> Result<Self, TadokuError> {
        let start = Instant::now();
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let index: DatasetIndex = read_json_member(&mut archive, INDEX_FILE)?;
        let cache_path = cache_path_for(archive_path);

        match load_cached(&cache_path) {
            Ok(snapshot) if snapshot.revision == index.revision => {
                let dataset =
                    Self::new(index.title, snapshot.revision, snapshot.entries, snapshot.kanji);
                info!(
                    title = %dataset.title,
                    entries = dataset.entries.len(),
                    kanji = dataset.kanji.len(),
                    elapsed = ?start.elapsed(),
                    "loaded dictionary dataset from cache"
                );
                return Ok(dataset);
            }
            Ok(snapshot) => {
                warn!(
                    "Revision mismatch for '{}': cache={}, index={}",
                    index.title, snapshot.revision, index.revision
                );
            }
            Err(e) => {
                warn!("Failed to load cache for '{}': {}, rebuilding from JSON", index.title, e);
            }
        }

        let entries: Vec<DictionaryEntry> = read_json_member(&mut archive, ENTRIES_FILE)?;
        let kanji: Vec<KanjiCharacter> = read_json_member(&mut archive, KANJI_FILE)?;
        let dataset = Self::new(index.title, index.revision, entries, kanji);

        if let Err(e) = dataset.save_cache(&cache_path) {
            warn!("Failed to save cache for '{}': {}", dataset.title, e);
        }

        info!(
            title = %dataset.title,
            entries = dataset.entries.len(),
            kanji = dataset.kanji.len(),
            elapsed = ?start.elapsed(),
            "built dictionary dataset from JSON"
        );
        Ok(dataset)
    }

    fn save_cache(&self, cache_path: &Path) -> Result<(), TadokuError> {
        let snapshot = DatasetSnapshotRef {
            revision: &self.revision,
            entries: &self.entries,
            kanji: &self.kanji,
        };
        let encoded = bincode::serde::encode_to_vec(&snapshot, bincode::config::standard())?;
        let mut file = File::create(cache_path)?;
        file.write_all(&encoded)?;
        Ok(())
    }
}

fn cache_path_for(archive_path: &Path) -> PathBuf {
    archive_path.with_extension("bin")
}

fn load_cached(cache_path: &Path) -> Result<DatasetSnapshot, TadokuError> {
    let buffer = fs::read(cache_path)?;
    let (snapshot, _): (DatasetSnapshot, usize) =
        bincode::serde::decode_from_slice(&buffer, bincode::config::standard())?;
    Ok(snapshot)
}

fn read_json_member<R, T>(archive: &mut ZipArchive<R>, name: &str) -> Result<T, TadokuError>
where
    R: Read + std::io::Seek,
    T: for<'de> Deserialize<'de>,
{
    let member = archive.by_name(name)?;
    let data: T = serde_json::from_reader(BufReader::new(member))?;
    Ok(data)
}
