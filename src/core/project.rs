//! Project configuration
//!
//! The project configuration records which menu drives the project and
//! where layer sources and build directories live. It is persisted as a
//! small JSON document (`.cooker.config`) at the project root, and found
//! again by walking up from the directory a command is run in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    BUILD_DIR_PREFIX, CONFIG_FILE_NAME, DEFAULT_BUILD_DIR, DEFAULT_LAYER_DIR,
};
use crate::error::ConfigError;
use crate::infra::filesystem::{read_file, write_file};
use crate::infra::paths::{normalize, relative_path, resolve_against};

/// On-disk shape of `.cooker.config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    menu: Option<PathBuf>,

    #[serde(rename = "layer-dir", default, skip_serializing_if = "Option::is_none")]
    layer_dir: Option<PathBuf>,

    #[serde(rename = "build-dir", default, skip_serializing_if = "Option::is_none")]
    build_dir: Option<PathBuf>,
}

/// Persisted project layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    root: PathBuf,
    data: ConfigFile,
}

impl ProjectConfig {
    /// Find the project configuration for `start`.
    ///
    /// `start` and each of its ancestors are searched for the config file.
    /// The first hit is loaded; on a miss an empty configuration rooted at
    /// `start` is returned.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        let start = normalize(start);
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!("Found project config at {}", candidate.display());
                return Self::load(dir);
            }
        }

        tracing::debug!(
            "No {} found above {}, using it as project root",
            CONFIG_FILE_NAME,
            start.display()
        );
        Ok(Self::empty(start))
    }

    /// Empty configuration rooted at `root`
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data: ConfigFile::default(),
        }
    }

    /// Load the configuration file stored in `root`
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let content = read_file(&path)?;
        let data = serde_json::from_str(&content).map_err(|e| ConfigError::Load {
            path,
            error: e.to_string(),
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            data,
        })
    }

    /// Record a new project layout.
    ///
    /// Fails with [`ConfigError::AlreadyInitialized`] when a menu is already
    /// recorded, unless `force` is set. Only the in-memory value changes;
    /// call [`save`](Self::save) to persist it.
    pub fn init(
        &mut self,
        menu: &Path,
        layer_dir: Option<&Path>,
        build_dir: Option<&Path>,
        force: bool,
    ) -> Result<(), ConfigError> {
        if !self.is_empty() && !force {
            return Err(ConfigError::AlreadyInitialized {
                path: self.root.clone(),
            });
        }

        let layer_dir = layer_dir.unwrap_or(Path::new(DEFAULT_LAYER_DIR));
        let build_dir = build_dir.unwrap_or(Path::new(DEFAULT_BUILD_DIR));

        self.data = ConfigFile {
            menu: Some(resolve_against(&self.root, menu)),
            layer_dir: Some(self.project_relative(layer_dir)),
            build_dir: Some(self.project_relative(build_dir)),
        };
        Ok(())
    }

    /// Replace the recorded menu, keeping the directory layout
    pub fn set_menu(&mut self, menu: &Path) {
        self.data.menu = Some(resolve_against(&self.root, menu));
    }

    /// Write the configuration file, replacing its previous content
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.config_path();
        let mut content =
            serde_json::to_string_pretty(&self.data).map_err(|e| ConfigError::Save {
                path: path.clone(),
                error: e.to_string(),
            })?;
        content.push('\n');
        write_file(&path, &content)?;

        tracing::debug!("Saved project config to {}", path.display());
        Ok(())
    }

    /// True until a menu has been recorded
    pub fn is_empty(&self) -> bool {
        self.data.menu.is_none()
    }

    pub fn project_root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn menu(&self) -> Option<&Path> {
        self.data.menu.as_deref()
    }

    /// Recorded menu, or [`ConfigError::NotInitialized`]
    pub fn require_menu(&self) -> Result<&Path, ConfigError> {
        self.menu().ok_or_else(|| ConfigError::NotInitialized {
            path: self.root.clone(),
        })
    }

    /// Absolute directory holding all layer sources
    pub fn layer_dir(&self) -> PathBuf {
        let dir = self
            .data
            .layer_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_LAYER_DIR));
        resolve_against(&self.root, dir)
    }

    /// Absolute path of `name` inside the layer directory
    pub fn layer_path(&self, name: impl AsRef<Path>) -> PathBuf {
        normalize(&self.layer_dir().join(name))
    }

    /// Absolute directory holding all build directories
    pub fn build_dir(&self) -> PathBuf {
        let dir = self
            .data
            .build_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_BUILD_DIR));
        resolve_against(&self.root, dir)
    }

    /// Absolute path of `name` inside the build directory
    pub fn build_path(&self, name: impl AsRef<Path>) -> PathBuf {
        normalize(&self.build_dir().join(name))
    }

    /// Build directory of target `target`
    pub fn target_build_dir(&self, target: &str) -> PathBuf {
        self.build_path(format!("{BUILD_DIR_PREFIX}{target}"))
    }

    /// Relative paths are kept relative to the root, absolute ones unchanged
    fn project_relative(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            relative_path(&self.root, &self.root.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilesystemError;
    use tempfile::TempDir;

    #[test]
    fn test_discover_miss_returns_empty_config() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::discover(temp.path()).unwrap();
        assert!(config.is_empty());
        assert_eq!(config.project_root(), temp.path());
    }

    #[test]
    fn test_discover_finds_config_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::empty(temp.path());
        config
            .init(Path::new("/menus/menu.json"), None, None, false)
            .unwrap();
        config.save().unwrap();

        let nested = temp.path().join("builds/build-t1/tmp");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ProjectConfig::discover(&nested).unwrap();
        assert_eq!(found.project_root(), temp.path());
        assert_eq!(found.menu(), Some(Path::new("/menus/menu.json")));
    }

    #[test]
    fn test_discover_rejects_malformed_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let err = ProjectConfig::discover(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }

    #[test]
    fn test_load_missing_config_reports_file() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::File(FilesystemError::ReadFile { ref path, .. })
                if path.ends_with(CONFIG_FILE_NAME)
        ));
    }

    #[test]
    fn test_init_twice_requires_force() {
        let mut config = ProjectConfig::empty("/project");
        config.init(Path::new("menu.json"), None, None, false).unwrap();

        let err = config
            .init(Path::new("other.json"), None, None, false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyInitialized { .. }));
        assert_eq!(config.menu(), Some(Path::new("/project/menu.json")));

        config
            .init(Path::new("other.json"), Some(Path::new("src")), None, true)
            .unwrap();
        assert_eq!(config.menu(), Some(Path::new("/project/other.json")));
        assert_eq!(config.layer_dir(), PathBuf::from("/project/src"));
    }

    #[test]
    fn test_init_normalizes_directories() {
        let mut config = ProjectConfig::empty("/project");
        config
            .init(
                Path::new("menu.json"),
                Some(Path::new("./sources/../layers")),
                Some(Path::new("/scratch/builds")),
                false,
            )
            .unwrap();

        assert_eq!(config.layer_dir(), PathBuf::from("/project/layers"));
        assert_eq!(config.build_dir(), PathBuf::from("/scratch/builds"));
        assert_eq!(
            config.target_build_dir("qemu"),
            PathBuf::from("/scratch/builds/build-qemu")
        );
    }

    #[test]
    fn test_defaults_before_init() {
        let config = ProjectConfig::empty("/project");
        assert_eq!(config.layer_dir(), PathBuf::from("/project/layers"));
        assert_eq!(config.build_dir(), PathBuf::from("/project/builds"));
        assert_eq!(
            config.layer_path("poky/meta"),
            PathBuf::from("/project/layers/poky/meta")
        );
        assert!(config.require_menu().is_err());
    }

    #[test]
    fn test_save_writes_expected_keys() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::empty(temp.path());
        config
            .init(Path::new("/m/menu.json"), None, None, false)
            .unwrap();
        config.save().unwrap();

        let raw = std::fs::read_to_string(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["menu"], "/m/menu.json");
        assert_eq!(value["layer-dir"], "layers");
        assert_eq!(value["build-dir"], "builds");
    }

    #[test]
    fn test_set_menu_keeps_layout() {
        let mut config = ProjectConfig::empty("/project");
        config
            .init(Path::new("a.json"), Some(Path::new("src")), None, false)
            .unwrap();
        config.set_menu(Path::new("/elsewhere/b.json"));
        assert_eq!(config.menu(), Some(Path::new("/elsewhere/b.json")));
        assert_eq!(config.layer_dir(), PathBuf::from("/project/src"));
    }
}
