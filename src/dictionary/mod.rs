pub mod dataset;
pub mod entry;
pub mod lookup_cache;
pub mod search;

pub use dataset::DictionaryDataset;
pub use entry::{
    DictionaryEntry,
    KanjiCharacter,
};
pub use lookup_cache::LookupCache;
pub use search::{
    search,
    search_by_part_of_speech,
    SearchResults,
};
