use serde::{
    Deserialize,
    Serialize,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KanjiSpelling {
    pub kanji_spelling: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reading {
    pub reading: String,
    #[serde(default)]
    pub pitch: Option<String>, // "downstep,upstep" as published with the dataset
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Gloss {
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sense {
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
    #[serde(default)]
    pub glosses: Vec<Gloss>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub id: u64,
    #[serde(default)]
    pub kanji_spellings: Vec<KanjiSpelling>,
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

impl DictionaryEntry {
    pub fn kanji_spelling_strs(&self) -> impl Iterator<Item = &str> {
        self.kanji_spellings.iter().map(|k| k.kanji_spelling.as_str())
    }

    pub fn reading_strs(&self) -> impl Iterator<Item = &str> {
        self.readings.iter().map(|r| r.reading.as_str())
    }

    pub fn has_part_of_speech(&self, tag: &str) -> bool {
        self.senses.iter().any(|sense| sense.parts_of_speech.iter().any(|pos| pos == tag))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KanjiCharacter {
    pub literal: String,
    #[serde(default)]
    pub on_readings: Vec<String>,
    #[serde(default)]
    pub kun_readings: Vec<String>,
    #[serde(default)]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub stroke_count: Option<u32>,
    #[serde(default)]
    pub frequency: Option<u32>,
}
