//! File system based catalog

use async_trait::async_trait;
use path_absolutize::Absolutize;
use podium_core::Achievement;
use podium_parser::{CatalogParser, ParseMode};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::validation::inspect_catalog;
use crate::{error::RepositoryError, traits::AchievementCatalog, RepositoryResult};

/// Catalog read from YAML files on disk
///
/// Every `*.yaml` / `*.yml` file under the root (recursively) is parsed on
/// each `list` call, so edits are picked up without a restart. Achievement
/// ids must be unique across all files.
///
/// The configured parse mode applies to [`load_all`](Self::load_all), which
/// callers run once at startup. `list` always parses leniently: a rule that
/// breaks after startup loads as `Criteria::Invalid` and only that
/// achievement stops qualifying.
pub struct FileSystemCatalog {
    /// Root directory of the catalog
    root_path: PathBuf,
    mode: ParseMode,
}

impl FileSystemCatalog {
    /// Create a new file system catalog in strict mode
    ///
    /// # Example
    /// ```no_run
    /// use podium_repository::FileSystemCatalog;
    ///
    /// let catalog = FileSystemCatalog::new("catalog").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        if !path.exists() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        Ok(Self {
            root_path: abs_path,
            mode: ParseMode::Strict,
        })
    }

    /// Set the parse mode used for catalog files
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Root directory of the catalog
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// All YAML files under the root, sorted for a stable catalog order
    async fn list_yaml_files(&self) -> RepositoryResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![self.root_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();

                if path.is_dir() {
                    pending.push(path);
                } else if is_yaml(&path) {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Load and parse the whole catalog with the configured parse mode
    pub async fn load_all(&self) -> RepositoryResult<Vec<Achievement>> {
        self.load(self.mode).await
    }

    async fn load(&self, mode: ParseMode) -> RepositoryResult<Vec<Achievement>> {
        let mut achievements = Vec::new();
        let mut seen = HashSet::new();

        for path in self.list_yaml_files().await? {
            let content = fs::read_to_string(&path).await?;
            let parsed = CatalogParser::parse(&content, mode).map_err(|e| {
                RepositoryError::Parser(format!("{}: {}", path.display(), e))
            })?;

            tracing::debug!(path = %path.display(), count = parsed.len(), "catalog file loaded");
            inspect_catalog(&path.to_string_lossy(), &parsed);

            for achievement in parsed {
                if !seen.insert(achievement.id.clone()) {
                    return Err(RepositoryError::Parser(format!(
                        "{}: Duplicate achievement id: {}",
                        path.display(),
                        achievement.id
                    )));
                }
                achievements.push(achievement);
            }
        }

        Ok(achievements)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[async_trait]
impl AchievementCatalog for FileSystemCatalog {
    async fn list(&self, sport_filter: Option<&str>) -> RepositoryResult<Vec<Achievement>> {
        let achievements = self.load(ParseMode::Lenient).await?;
        Ok(achievements
            .into_iter()
            .filter(|a| a.matches_sport_hint(sport_filter))
            .collect())
    }
}
