use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokenizers::Tokenizer;

/// Hub identifier used when no local tokenizer file is configured.
pub const DEFAULT_TOKENIZER_MODEL: &str = "gpt2";

static SHARED_TOKENIZER: OnceCell<Arc<dyn TokenCodec>> = OnceCell::new();

#[derive(Debug, Error)]
#[error("tokenizer error: {0}")]
pub struct TokenizerError(pub String);

/// Subword tokenizer used to size chunks.
///
/// Counts only need to be approximate; they are not required to line up with
/// whatever model later embeds the text.
pub trait TokenCodec: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError>;

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError>;

    fn count_tokens(&self, text: &str) -> Result<usize, TokenizerError> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.encode(text)?.len())
    }
}

/// Where the shared tokenizer is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    File(PathBuf),
    Pretrained(String),
}

impl Default for TokenizerSource {
    fn default() -> Self {
        TokenizerSource::Pretrained(DEFAULT_TOKENIZER_MODEL.to_string())
    }
}

/// `TokenCodec` backed by a Hugging Face `tokenizers` model.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        let path = path.as_ref();
        log::debug!("Loading tokenizer from {:?}", path);
        Tokenizer::from_file(path)
            .map(|inner| Self { inner })
            .map_err(|e| TokenizerError(format!("failed to load {:?}: {}", path, e)))
    }

    pub fn from_pretrained(identifier: &str) -> Result<Self, TokenizerError> {
        log::debug!("Loading pretrained tokenizer {}", identifier);
        Tokenizer::from_pretrained(identifier, None)
            .map(|inner| Self { inner })
            .map_err(|e| TokenizerError(format!("failed to load {}: {}", identifier, e)))
    }

    pub fn load(source: &TokenizerSource) -> Result<Self, TokenizerError> {
        match source {
            TokenizerSource::File(path) => Self::from_file(path),
            TokenizerSource::Pretrained(identifier) => Self::from_pretrained(identifier),
        }
    }
}

impl TokenCodec for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        self.inner
            .encode(text, false)
            .map(|encoding| encoding.get_ids().to_vec())
            .map_err(|e| TokenizerError(e.to_string()))
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        self.inner
            .decode(ids, false)
            .map_err(|e| TokenizerError(e.to_string()))
    }
}

/// Process-wide tokenizer, loaded on first use.
///
/// Only the first successful call's `source` is honoured; later calls get the
/// instance that is already loaded.
pub fn shared_tokenizer(source: &TokenizerSource) -> Result<Arc<dyn TokenCodec>, TokenizerError> {
    SHARED_TOKENIZER
        .get_or_try_init(|| {
            log::info!("Initialising shared tokenizer from {:?}", source);
            HfTokenizer::load(source).map(|t| Arc::new(t) as Arc<dyn TokenCodec>)
        })
        .cloned()
}
