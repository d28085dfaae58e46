use std::{
    fs::File,
    io::BufReader,
    path::Path,
    time::Instant,
};

use tracing::info;
use vibrato::{
    Dictionary,
    Tokenizer,
};

use super::token::{
    Token,
    VibratoToken,
};
use crate::core::TadokuError;

/// Morphological analysis is supplied from outside; the core only consumes tokens.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, TadokuError>;
}

pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
}

impl VibratoAnalyzer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Loads an ipadic system dictionary, zstd compressed (`.zst`) or plain.
    pub fn from_path(path: &Path) -> Result<Self, TadokuError> {
        let start = Instant::now();
        let file = File::open(path)?;

        let dict = if path.extension().and_then(|ext| ext.to_str()) == Some("zst") {
            let decoder = zstd::stream::read::Decoder::new(BufReader::new(file))?;
            Dictionary::read(decoder)?
        } else {
            Dictionary::read(BufReader::new(file))?
        };

        info!(path = %path.display(), elapsed = ?start.elapsed(), "loaded analyzer dictionary");
        Ok(Self::new(Tokenizer::new(dict)))
    }
}

impl Analyzer for VibratoAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, TadokuError> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();

        Ok(worker.token_iter().map(|token| Token::from(VibratoToken::from(token))).collect())
    }
}
