//! # Feature: File Fetch
//!
//! Looks up a file by id in a configured directory so it can be uploaded to
//! the requesting channel. Ids are restricted to a safe character set, so a
//! lookup can never leave the directory.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: true (disabled when FILES_DIR is unset)
//!
//! ## Changelog
//! - 1.0.0: Initial release with /file and !file

use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Discord upload limit for servers with no boost or boost tier 1 (25 MB)
pub const DISCORD_UPLOAD_LIMIT_DEFAULT: u64 = 25 * 1024 * 1024;

static FILE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn file_id_regex() -> &'static Regex {
    FILE_ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("file id pattern is valid"))
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Id de arquivo inválido. Use apenas letras, números, `-` e `_`.")]
    InvalidId,
    #[error("Arquivo `{0}` não encontrado.")]
    NotFound(String),
    #[error("Arquivo `{0}` é grande demais para enviar.")]
    TooLarge(String),
    #[error("O envio de arquivos não está configurado.")]
    Disabled,
    #[error("Falha ao ler o arquivo.")]
    Io(#[from] std::io::Error),
}

/// A file ready for upload
#[derive(Debug)]
pub struct StoredFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Read-only view over the files directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_size: u64,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_size: DISCORD_UPLOAD_LIMIT_DEFAULT,
        }
    }

    /// Override the upload size limit
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn validate_id(id: &str) -> Result<(), FileError> {
        if file_id_regex().is_match(id) {
            Ok(())
        } else {
            Err(FileError::InvalidId)
        }
    }

    /// Find the file whose stem or full name equals `id`
    ///
    /// Entries are checked in name order so duplicate stems resolve the same way every time.
    pub async fn find(&self, id: &str) -> Result<PathBuf, FileError> {
        Self::validate_id(id)?;

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut candidates = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let name_matches = path.file_name().is_some_and(|n| n == id);
            let stem_matches = path.file_stem().is_some_and(|s| s == id);
            if name_matches || stem_matches {
                candidates.push(path);
            }
        }
        candidates.sort();

        debug!("File lookup '{id}' matched {} entries", candidates.len());
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| FileError::NotFound(id.to_string()))
    }

    /// Find and read a file, enforcing the upload limit
    pub async fn load(&self, id: &str) -> Result<StoredFile, FileError> {
        let path = self.find(id).await?;

        let size = tokio::fs::metadata(&path).await?.len();
        if size > self.max_size {
            return Err(FileError::TooLarge(id.to_string()));
        }

        let bytes = tokio::fs::read(&path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.to_string());

        Ok(StoredFile { filename, bytes })
    }
}
