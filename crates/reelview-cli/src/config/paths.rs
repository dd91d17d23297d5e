//! Config file location.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Directory name under the config base.
const APP_DIR: &str = "reelview";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Order: `{dir}/config.toml`, then `$XDG_CONFIG_HOME/reelview/config.toml`,
/// then `$HOME/.config/reelview/config.toml`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and neither base directory is set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    default_config_path(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Picks the config base from the given environment values.
///
/// A relative or empty `XDG_CONFIG_HOME` is ignored.
fn default_config_path(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    let base = if let Some(xdg) = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
    {
        xdg
    } else if let Some(home) = home.filter(|h| !h.is_empty()) {
        PathBuf::from(home).join(".config")
    } else {
        bail!("cannot locate config: neither XDG_CONFIG_HOME nor HOME is set");
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/reelview-test");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/reelview-test/config.toml"));
    }

    #[test]
    fn test_xdg_config_home_wins_over_home() {
        // Arrange & Act
        let path = default_config_path(
            Some(OsString::from("/xdg/config")),
            Some(OsString::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/config/reelview/config.toml"));
    }

    #[test]
    fn test_relative_xdg_falls_back_to_home() {
        // Arrange & Act
        let path = default_config_path(
            Some(OsString::from("relative/dir")),
            Some(OsString::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/user/.config/reelview/config.toml")
        );
    }

    #[test]
    fn test_no_base_directory_fails() {
        // Arrange & Act
        let result = default_config_path(Some(OsString::new()), None);

        // Assert
        assert!(result.is_err());
    }
}
