pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::Config;
pub use errors::TadokuError;
pub use models::{
    Line,
    LineKanji,
    LineWord,
    Story,
    StoryStatus,
    Word,
};
pub use pipeline::LanguageTools;
