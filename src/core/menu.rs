//! Menu model and loading
//!
//! A menu is the JSON document describing a project: the base layer set,
//! the sources to fetch, and the build targets. It is read-only input.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::config::defaults::{DEFAULT_IMAGE, DEFAULT_METHOD};
use crate::error::MenuError;
use crate::infra::filesystem::read_file;

/// Project menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Menu {
    /// Layers shared by every target
    #[serde(default)]
    pub layers: Vec<String>,

    /// Repositories to fetch into the layer directory
    #[serde(default)]
    pub sources: Vec<Source>,

    /// Build targets by name, in declaration order
    #[serde(default)]
    pub targets: Targets,
}

/// Targets keyed by name, kept in the order the menu declares them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets(Vec<(String, Target)>);

impl Targets {
    /// Insert or replace; a replaced target keeps its original position
    pub fn insert(&mut self, name: String, target: Target) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = target,
            None => self.0.push((name, target)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.0.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Target)> for Targets {
    fn from_iter<I: IntoIterator<Item = (String, Target)>>(iter: I) -> Self {
        let mut targets = Self::default();
        for (name, target) in iter {
            targets.insert(name, target);
        }
        targets
    }
}

impl<'de> Deserialize<'de> for Targets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TargetsVisitor;

        impl<'de> Visitor<'de> for TargetsVisitor {
            type Value = Targets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of target names to targets")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Targets, A::Error> {
                let mut targets = Targets::default();
                while let Some((name, target)) = map.next_entry::<String, Target>()? {
                    targets.insert(name, target);
                }
                Ok(targets)
            }
        }

        deserializer.deserialize_map(TargetsVisitor)
    }
}

/// How a source is obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Clone/update with git
    #[default]
    Git,
    /// Leave the source alone
    Ignore,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "{DEFAULT_METHOD}"),
            Self::Ignore => write!(f, "ignore"),
        }
    }
}

/// A source repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Source {
    #[serde(default)]
    pub method: Method,

    #[serde(default)]
    pub url: Option<String>,

    /// Local directory override, relative to the layer directory
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub commit: Option<String>,
}

/// How reproducible a source checkout is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reproducibility {
    /// Pinned to a commit
    Pinned,
    /// Follows a branch
    Branch,
    /// Neither branch nor commit given
    Unpinned,
}

impl Source {
    /// Local directory name relative to the layer directory.
    ///
    /// `dir` wins; otherwise the path component of `url` with any `.git`
    /// suffix and surrounding slashes removed.
    pub fn local_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = non_empty(self.dir.as_deref()) {
            return Some(PathBuf::from(dir));
        }
        let path = url_path(non_empty(self.url.as_deref())?);
        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    pub fn branch(&self) -> Option<&str> {
        non_empty(self.branch.as_deref())
    }

    pub fn commit(&self) -> Option<&str> {
        non_empty(self.commit.as_deref())
    }

    /// Display name used in messages
    pub fn name(&self) -> String {
        self.local_dir().map_or_else(
            || self.url().unwrap_or("<unnamed>").to_string(),
            |dir| dir.display().to_string(),
        )
    }

    pub fn reproducibility(&self) -> Reproducibility {
        match (self.commit(), self.branch()) {
            (Some(_), _) => Reproducibility::Pinned,
            (None, Some(_)) => Reproducibility::Branch,
            (None, None) => Reproducibility::Unpinned,
        }
    }
}

/// A build target
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub image: Option<String>,

    /// Layers added on top of the menu's base layers
    #[serde(default)]
    pub layers: Vec<String>,

    /// Literal lines copied into `local.conf`
    #[serde(rename = "local.conf", default)]
    pub local_conf: Vec<String>,
}

impl Target {
    /// Image to build, defaulting to `core-image-base`
    pub fn image(&self) -> &str {
        non_empty(self.image.as_deref()).unwrap_or(DEFAULT_IMAGE)
    }
}

impl Menu {
    /// Read and validate the menu at `path`
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = read_file(path)?;
        let menu = Self::from_json(&content).map_err(|e| MenuError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        menu.validate(path)?;
        tracing::debug!(
            "Loaded menu {}: {} sources, {} targets",
            path.display(),
            menu.sources.len(),
            menu.targets.len()
        );
        Ok(menu)
    }

    /// Parse a menu from JSON without further validation
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Every fetched source must resolve to a local directory
    pub fn validate(&self, path: &Path) -> Result<(), MenuError> {
        for (index, source) in self.sources.iter().enumerate() {
            if source.method == Method::Ignore {
                continue;
            }
            if source.url().is_none() && source.local_dir().is_none() {
                return Err(MenuError::InvalidSource {
                    path: path.to_path_buf(),
                    index,
                    reason: "needs a 'url' or a 'dir'".to_string(),
                });
            }
            if source.local_dir().is_none() {
                return Err(MenuError::InvalidSource {
                    path: path.to_path_buf(),
                    index,
                    reason: "cannot derive a directory from 'url'; set 'dir'".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Base layers followed by the target's own layers, in order
    pub fn target_layers<'a>(&'a self, target: &'a Target) -> impl Iterator<Item = &'a str> {
        self.layers
            .iter()
            .chain(&target.layers)
            .map(String::as_str)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Path component of a URL; scp-like `host:path` and plain paths included
fn url_path(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    if let Some((_, rest)) = without_query.split_once("://") {
        return rest.find('/').map_or("", |i| &rest[i..]);
    }
    match without_query.split_once(':') {
        Some((host, path)) if !host.contains('/') => path,
        _ => without_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"{
        "layers": ["poky/meta", "poky/meta-poky"],
        "sources": [
            { "url": "git://git.yoctoproject.org/poky", "branch": "kirkstone" },
            { "method": "ignore", "dir": "local-layer" },
            { "url": "https://x/y/repo.git", "dir": "meta-custom", "commit": "abc123" }
        ],
        "targets": {
            "qemu": { "local.conf": ["MACHINE = \"qemux86-64\""] },
            "pi": { "image": "core-image-minimal", "layers": ["meta-raspberrypi"], "local.conf": [] }
        }
    }"#;

    #[test]
    fn test_parse_menu() {
        let menu = Menu::from_json(MENU).unwrap();
        assert_eq!(menu.layers, vec!["poky/meta", "poky/meta-poky"]);
        assert_eq!(menu.sources.len(), 3);
        assert_eq!(menu.sources[0].method, Method::Git);
        assert_eq!(menu.sources[1].method, Method::Ignore);
        assert_eq!(menu.targets.get("qemu").unwrap().image(), "core-image-base");
        assert_eq!(menu.targets.get("pi").unwrap().image(), "core-image-minimal");
    }

    #[test]
    fn test_targets_keep_declaration_order() {
        let menu = Menu::from_json(MENU).unwrap();
        let names: Vec<_> = menu.targets.names().collect();
        assert_eq!(names, vec!["qemu", "pi"]);
    }

    #[test]
    fn test_local_dir_derived_from_url() {
        let source = Source {
            url: Some("https://x/y/repo.git".to_string()),
            ..Source::default()
        };
        assert_eq!(source.local_dir(), Some(PathBuf::from("y/repo")));

        let source = Source {
            url: Some("git://git.yoctoproject.org/poky".to_string()),
            ..Source::default()
        };
        assert_eq!(source.local_dir(), Some(PathBuf::from("poky")));

        let source = Source {
            url: Some("git@github.com:org/meta-foo.git".to_string()),
            ..Source::default()
        };
        assert_eq!(source.local_dir(), Some(PathBuf::from("org/meta-foo")));
    }

    #[test]
    fn test_local_dir_override_wins() {
        let source = Source {
            url: Some("https://x/y/repo.git".to_string()),
            dir: Some("meta-custom".to_string()),
            ..Source::default()
        };
        assert_eq!(source.local_dir(), Some(PathBuf::from("meta-custom")));
    }

    #[test]
    fn test_reproducibility() {
        let mut source = Source::default();
        assert_eq!(source.reproducibility(), Reproducibility::Unpinned);
        source.branch = Some(String::new());
        assert_eq!(source.reproducibility(), Reproducibility::Unpinned);
        source.branch = Some("main".to_string());
        assert_eq!(source.reproducibility(), Reproducibility::Branch);
        source.commit = Some("deadbeef".to_string());
        assert_eq!(source.reproducibility(), Reproducibility::Pinned);
    }

    #[test]
    fn test_target_layers_keep_order_and_duplicates() {
        let menu = Menu {
            layers: vec!["a".to_string(), "b".to_string()],
            ..Menu::default()
        };
        let target = Target {
            layers: vec!["c".to_string(), "a".to_string()],
            ..Target::default()
        };
        let layers: Vec<_> = menu.target_layers(&target).collect();
        assert_eq!(layers, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = Menu::from_json(r#"{ "sources": [{ "method": "svn", "url": "x" }] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_rejects_source_without_location() {
        let menu = Menu::from_json(r#"{ "sources": [{ "branch": "main" }] }"#).unwrap();
        let err = menu.validate(Path::new("menu.json")).unwrap_err();
        assert!(matches!(err, MenuError::InvalidSource { index: 0, .. }));
    }

    #[test]
    fn test_validate_allows_ignored_source_without_location() {
        let menu = Menu::from_json(r#"{ "sources": [{ "method": "ignore" }] }"#).unwrap();
        assert!(menu.validate(Path::new("menu.json")).is_ok());
    }

    #[test]
    fn test_load_missing_menu_fails() {
        let err = Menu::load(Path::new("/nonexistent/menu.json")).unwrap_err();
        assert!(matches!(
            err,
            MenuError::Read(crate::error::FilesystemError::ReadFile { .. })
        ));
    }
}
