use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use super::TadokuError;
use crate::persistence::{
    get_app_data_dir,
    get_data_file_path,
    load_json_or_default,
    save_json,
};

pub const CONFIG_FILE: &str = "config.json";

pub const INITIAL_COUNTDOWN: u32 = 7;
pub const INITIAL_RANK: i64 = 0;
pub const DRILL_COOLDOWN_SECS: i64 = 60 * 60 * 3;
pub const MAX_ENTRIES_PER_WORD: usize = 8;
pub const SEARCH_RESULT_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dictionary_archive: PathBuf,
    pub tokenizer_dictionary: PathBuf,
    pub store_file: String,
    pub initial_countdown: u32,
    pub initial_rank: i64,
    pub drill_cooldown_secs: i64,
    // Past this many matches the entries stop being useful as definitions.
    pub max_entries_per_word: usize,
    pub search_result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let dict_dir = get_app_data_dir().join("dictionaries");
        Self {
            dictionary_archive: dict_dir.join("entries.zip"),
            tokenizer_dictionary: dict_dir.join("ipadic-mecab-2_7_0").join("system.dic.zst"),
            store_file: "vocabulary.json".to_string(),
            initial_countdown: INITIAL_COUNTDOWN,
            initial_rank: INITIAL_RANK,
            drill_cooldown_secs: DRILL_COOLDOWN_SECS,
            max_entries_per_word: MAX_ENTRIES_PER_WORD,
            search_result_limit: SEARCH_RESULT_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        load_json_or_default(CONFIG_FILE)
    }

    pub fn save(&self) -> Result<(), TadokuError> {
        save_json(self, CONFIG_FILE)
    }

    pub fn store_path(&self) -> PathBuf {
        get_data_file_path(&self.store_file)
    }
}
