use crate::artifacts::lines::DiffConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("the specified path does not exist: {0:?}")]
    NotFound(PathBuf),

    #[error("the specified path is a directory: {0:?}")]
    IsDirectory(PathBuf),

    #[error("{0:?} does not contain UTF-8 text")]
    NotText(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Split text into lines on `\n`, `\r\n` or `\r`.
///
/// A trailing line break yields a final empty line, so empty text is one empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while let Some(index) = rest.find(['\n', '\r']) {
        lines.push(rest[..index].to_string());
        let break_len = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + break_len..];
    }
    lines.push(rest.to_string());

    lines
}

/// Files the diff commands read, resolved against a base directory.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.path.join(file)
        }
    }

    pub fn read_text(&self, file: &Path) -> Result<String, WorkspaceError> {
        let path = self.resolve(file);

        if !path.exists() {
            return Err(WorkspaceError::NotFound(path));
        }
        if path.is_dir() {
            return Err(WorkspaceError::IsDirectory(path));
        }

        let bytes = std::fs::read(&path).map_err(|source| WorkspaceError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read file");

        String::from_utf8(bytes).map_err(|_| WorkspaceError::NotText(path))
    }

    pub fn read_lines(&self, file: &Path) -> Result<Vec<String>, WorkspaceError> {
        Ok(split_lines(&self.read_text(file)?))
    }

    pub fn read_config(&self, file: &Path) -> Result<DiffConfig, WorkspaceError> {
        let text = self.read_text(file)?;
        DiffConfig::from_json(&text).map_err(|source| WorkspaceError::Config {
            path: self.resolve(file),
            source,
        })
    }
}
