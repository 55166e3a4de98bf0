//! Default configuration values

/// Project configuration file name, stored at the project root
pub const CONFIG_FILE_NAME: &str = ".cooker.config";

/// Default directory (relative to the project root) holding layer sources
pub const DEFAULT_LAYER_DIR: &str = "layers";

/// Default directory (relative to the project root) holding build directories
pub const DEFAULT_BUILD_DIR: &str = "builds";

/// Prefix of every per-target build directory name
pub const BUILD_DIR_PREFIX: &str = "build-";

/// Download method used when a source does not name one
pub const DEFAULT_METHOD: &str = "git";

/// Image built when a target does not name one
pub const DEFAULT_IMAGE: &str = "core-image-base";

/// Build environment script, relative to the layer directory
pub const INIT_SCRIPT: &str = "poky/oe-init-build-env";

/// External build engine program
pub const BUILD_ENGINE: &str = "bitbake";

/// Shell used to source the build environment script
pub const SHELL: &str = "bash";

/// VCS client program
pub const GIT: &str = "git";

/// Shared download cache directory, relative to the project root
pub const DOWNLOADS_DIR: &str = "downloads";

/// Shared state cache directory, relative to the project root
pub const SSTATE_DIR: &str = "sstate-cache";

/// Template-config pointer file, relative to the project root
pub const TEMPLATECONF_FILE: &str = "conf/templateconf.cfg";

/// Contents of the template-config pointer file
pub const TEMPLATECONF_CONTENT: &str = "meta-poky/conf\n";

/// Banner at the top of every generated configuration file
pub const GENERATED_BANNER: &str = "# DO NOT EDIT! - This file is automatically created by cooker.\n";
