pub mod core;
pub mod dictionary;
pub mod drill;
pub mod persistence;
pub mod segmentation;
pub mod story;
pub mod vocabulary;

pub use crate::core::{
    Config,
    LanguageTools,
    TadokuError,
};
pub use drill::{
    DrillOrder,
    DrillOutcome,
    DrillRequest,
    DrillSelection,
};
pub use vocabulary::MemoryStore;
