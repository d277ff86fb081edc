use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::ReorderConfig;
use crate::errors::{self, ReorderError};

pub const CONFIG_FILE_NAME: &str = ".rule-reorder.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ReorderConfig, String> {
    let config = toml::from_str::<ReorderConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file. Unlike discovery, a missing
/// or invalid file is an error.
pub fn load_config_from(path: &Path) -> errors::Result<ReorderConfig> {
    let contents = read_config_file(path).map_err(|e| ReorderError::io(path, e))?;
    let config = parse_and_validate_config(&contents)
        .map_err(|message| ReorderError::config_with_path(message, path))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<ReorderConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Absent files are the normal case during discovery
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.rule-reorder.toml` upward from `start`, or use defaults.
pub fn load_config(start: &Path) -> ReorderConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ReorderConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParamKey, UnclassifiedPolicy};
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [layout]
            header_indent = 4
            param_indent = 8

            [policy]
            unclassified = "keep"
            strict = true

            [[ghost]]
            name = "paused"
            type = "bool"

            [[ghost]]
            name = "owner"
        "#})
        .unwrap();

        assert_eq!(config.layout.header_indent, 4);
        assert_eq!(config.layout.param_indent, 8);
        assert_eq!(config.policy.unclassified, UnclassifiedPolicy::Keep);
        assert!(config.policy.strict);
        assert_eq!(
            config.ghost,
            Some(vec![
                ParamKey::new("paused", "bool"),
                ParamKey::name_only("owner"),
            ])
        );
        assert!(config.parametric.is_none());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config.layout.header_indent, 12);
        assert!(config.ghost.is_none());
    }

    #[test]
    fn test_parse_error_mentions_file_name() {
        let err = parse_and_validate_config("[layout\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [[parametric]]
            name = "value"
            type = "bool"

            [[parametric]]
            name = "value"
            type = "bool"
        "#})
        .unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_discovery_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[layout]\nheader_indent = 0\nparam_indent = 4\n",
        )
        .unwrap();

        let config = load_config(&nested);
        assert_eq!(config.layout.header_indent, 0);
        assert_eq!(config.layout.param_indent, 4);
    }

    #[test]
    fn test_discovery_ignores_invalid_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "not = [valid").unwrap();
        let config = load_config(temp.path());
        assert_eq!(config.layout.header_indent, 12);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ReorderError::Io { .. }));
    }

    #[test]
    fn test_explicit_invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[[ghost]]\nname = \"\"\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ReorderError::Config { path: Some(_), .. }));
    }

    #[test]
    fn test_directory_ancestors_limit() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
