//! Build directory generation
//!
//! Materializes one build directory per menu target and writes its
//! `conf/local.conf` and `conf/bblayers.conf`. Files are rewritten whole on
//! every run and depend only on the menu and the project layout, so running
//! twice yields identical bytes.
//!
//! All paths written into the files are relative to `${TOPDIR}` (the build
//! directory itself), which keeps a project relocatable.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::defaults::{
    DOWNLOADS_DIR, GENERATED_BANNER, SSTATE_DIR, TEMPLATECONF_CONTENT, TEMPLATECONF_FILE,
};
use crate::core::menu::{Menu, Target};
use crate::core::project::ProjectConfig;
use crate::error::FilesystemError;
use crate::infra::filesystem::{create_dir_all, write_file};
use crate::infra::paths::relative_path;

/// Disk monitoring, distro and packaging defaults appended to `local.conf`
const LOCAL_CONF_DEFAULTS: &str = r#"DISTRO ?= "poky"
PACKAGE_CLASSES ?= "package_rpm"
USER_CLASSES ?= "buildstats"
PATCHRESOLVE = "noop"

BB_DISKMON_DIRS ??= "\
    STOPTASKS,${TMPDIR},1G,100K \
    STOPTASKS,${DL_DIR},1G,100K \
    STOPTASKS,${SSTATE_DIR},1G,100K \
    STOPTASKS,/tmp,100M,100K \
    HALT,${TMPDIR},100M,1K \
    HALT,${DL_DIR},100M,1K \
    HALT,${SSTATE_DIR},100M,1K \
    HALT,/tmp,10M,1K"

CONF_VERSION = "2"
"#;

/// Fixed head of `bblayers.conf`, up to the layer list
const BBLAYERS_PREAMBLE: &str = r#"POKY_BBLAYERS_CONF_VERSION = "2"

BBPATH = "${TOPDIR}"
BBFILES ?= ""

"#;

/// Build directory written for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTarget {
    pub name: String,
    pub build_dir: PathBuf,
}

/// Generate build directories for every target of `menu`.
///
/// Also writes the template-config pointer file once.
pub fn generate_all(
    menu: &Menu,
    config: &ProjectConfig,
) -> Result<Vec<GeneratedTarget>, FilesystemError> {
    let mut generated = Vec::with_capacity(menu.targets.len());
    for (name, target) in menu.targets.iter() {
        generated.push(generate_target(menu, name, target, config)?);
    }

    write_templateconf(config)?;
    Ok(generated)
}

/// Create the build directory of one target and write its config files
pub fn generate_target(
    menu: &Menu,
    name: &str,
    target: &Target,
    config: &ProjectConfig,
) -> Result<GeneratedTarget, FilesystemError> {
    let build_dir = config.target_build_dir(name);
    let conf_dir = build_dir.join("conf");
    create_dir_all(&conf_dir)?;

    write_file(
        &conf_dir.join("local.conf"),
        &local_conf_content(target, config, &build_dir),
    )?;
    write_file(
        &conf_dir.join("bblayers.conf"),
        &bblayers_conf_content(menu, target, config, &build_dir),
    )?;

    tracing::info!("Generated {}", build_dir.display());
    Ok(GeneratedTarget {
        name: name.to_string(),
        build_dir,
    })
}

/// Write the template-config pointer under the project root
pub fn write_templateconf(config: &ProjectConfig) -> Result<(), FilesystemError> {
    write_file(
        &config.project_root().join(TEMPLATECONF_FILE),
        TEMPLATECONF_CONTENT,
    )
}

/// Content of `local.conf` for `target` built in `build_dir`
pub fn local_conf_content(target: &Target, config: &ProjectConfig, build_dir: &Path) -> String {
    let root = config.project_root();
    let mut content = String::from(GENERATED_BANNER);
    content.push('\n');

    for line in &target.local_conf {
        content.push_str(line);
        content.push('\n');
    }
    content.push('\n');

    let _ = writeln!(
        content,
        "DL_DIR ?= \"{}\"",
        topdir_path(build_dir, &root.join(DOWNLOADS_DIR))
    );
    let _ = writeln!(
        content,
        "SSTATE_DIR ?= \"{}\"",
        topdir_path(build_dir, &root.join(SSTATE_DIR))
    );
    content.push('\n');
    content.push_str(LOCAL_CONF_DEFAULTS);
    content
}

/// Content of `bblayers.conf` for `target` built in `build_dir`
pub fn bblayers_conf_content(
    menu: &Menu,
    target: &Target,
    config: &ProjectConfig,
    build_dir: &Path,
) -> String {
    let mut content = String::from(GENERATED_BANNER);
    content.push('\n');
    content.push_str(BBLAYERS_PREAMBLE);

    content.push_str("BBLAYERS ?= \" \\\n");
    for layer in menu.target_layers(target) {
        let _ = writeln!(
            content,
            "    {} \\",
            topdir_path(build_dir, &config.layer_path(layer))
        );
    }
    content.push_str("\"\n");
    content
}

/// `path` expressed relative to `${TOPDIR}` (= `build_dir`)
fn topdir_path(build_dir: &Path, path: &Path) -> String {
    format!("${{TOPDIR}}/{}", relative_path(build_dir, path).display())
}
