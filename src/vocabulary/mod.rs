pub mod category;
pub mod extractor;
pub mod reclassify;
pub mod store;

pub use category::{
    categorize,
    Category,
    CategoryFilter,
};
pub use extractor::{
    LineExtraction,
    VocabularyExtractor,
};
pub use reclassify::{
    reclassify_all,
    ReclassifyReport,
};
pub use store::{
    MemoryStore,
    StoryStore,
    VocabStore,
};
