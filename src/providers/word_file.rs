use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

use crate::errors::SourceError;
use crate::providers::WordListSource;

/// Word list read from a local newline-separated file.
///
/// Blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone)]
pub struct WordFile {
    path: PathBuf,
}

impl WordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_words(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl WordListSource for WordFile {
    async fn fetch_all(&self) -> Result<Vec<String>, SourceError> {
        debug!("Reading word list from {:?}", self.path);

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        Ok(Self::parse_words(&content))
    }
}
