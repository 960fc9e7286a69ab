//! Environment configuration shipped inside a cloned repository
//!
//! A repository may carry a config file at its root that pre-answers the
//! environment questions. The resolver only loads it into a loose mapping;
//! the keys are validated by the provisioner that consumes them
//! (see [`crate::environment::seed`]).
//!
//! Supported formats are picked by extension: `.json` is read as JSON,
//! everything else (`.yaml`, `.yml`, no extension) as YAML.

use std::fs;
use std::path::{Component, Path};

use serde_json::{Map, Value};

use crate::error::{self, Result};
use crate::workspace::Workspace;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wpenv.config.yaml";

/// Loosely typed configuration: string keys to arbitrary values
pub type ResolvedConfiguration = Map<String, Value>;

/// Finds and loads the optional config file of a fetched tree
pub trait ConfigResolver {
    /// `Ok(None)` when the file does not exist
    fn resolve(&self, workspace: &Workspace, file_name: &str)
    -> Result<Option<ResolvedConfiguration>>;
}

/// Reads the config file from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileConfigResolver;

impl ConfigResolver for FileConfigResolver {
    fn resolve(
        &self,
        workspace: &Workspace,
        file_name: &str,
    ) -> Result<Option<ResolvedConfiguration>> {
        let relative = Path::new(file_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(error::config::read_failed(
                file_name,
                "must be a path relative to the repository root",
            ));
        }

        let path = workspace.path().join(relative);
        if !path.exists() {
            log::debug!("no {file_name} in repository, using interactive defaults");
            return Ok(None);
        }

        let config = load(&path)?;
        log::info!("loaded {} setting(s) from {file_name}", config.len());
        Ok(Some(config))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Load a config file into a mapping
pub fn load(path: &Path) -> Result<ResolvedConfiguration> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| error::config::read_failed(&display, e.to_string()))?;
    parse(&content, Format::of(path), &display)
}

fn parse(content: &str, format: Format, path: &str) -> Result<ResolvedConfiguration> {
    if format == Format::Yaml && content.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = match format {
        Format::Json => serde_json::from_str(content)
            .map_err(|e| error::config::parse_failed(path, e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(content)
            .map_err(|e| error::config::parse_failed(path, e.to_string()))?,
    };

    match value {
        Value::Object(map) => Ok(map),
        // a YAML document holding only comments
        Value::Null => Ok(Map::new()),
        other => Err(error::config::parse_failed(
            path,
            format!("expected a mapping at the top level, found {}", kind_of(&other)),
        )),
    }
}

/// Human name of a JSON value's type, for error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WpenvError;
    use crate::test_fixtures::write_tree;
    use tempfile::TempDir;

    fn workspace_with(files: &[(&str, &str)]) -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        write_tree(dir.path(), files);
        let workspace = Workspace::new(dir.path());
        (dir, workspace)
    }

    #[test]
    fn test_missing_file_resolves_to_none() {
        let (_dir, workspace) = workspace_with(&[("index.php", "<?php")]);
        let resolved = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_yaml_file_is_loaded() {
        let (_dir, workspace) = workspace_with(&[(
            DEFAULT_CONFIG_FILE,
            "hostname: site.test\nmountPoint: wp-content/themes/site\nwordpress:\n  https: true\n",
        )]);

        let config = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap()
            .unwrap();

        assert_eq!(config["hostname"], "site.test");
        assert_eq!(config["mountPoint"], "wp-content/themes/site");
        assert_eq!(config["wordpress"]["https"], true);
    }

    #[test]
    fn test_json_file_is_loaded() {
        let (_dir, workspace) = workspace_with(&[(
            "env.json",
            r#"{"hostname": "site.test", "extraHosts": ["www.site.test"]}"#,
        )]);

        let config = FileConfigResolver
            .resolve(&workspace, "env.json")
            .unwrap()
            .unwrap();

        assert_eq!(config["extraHosts"][0], "www.site.test");
    }

    #[test]
    fn test_empty_yaml_is_empty_mapping() {
        let (_dir, workspace) = workspace_with(&[(DEFAULT_CONFIG_FILE, "")]);
        let config = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap();
        assert_eq!(config, Some(Map::new()));
    }

    #[test]
    fn test_malformed_file_fails() {
        let (_dir, workspace) = workspace_with(&[(DEFAULT_CONFIG_FILE, "hostname: [unclosed\n")]);
        let err = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap_err();
        assert!(matches!(err, WpenvError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_top_level_list_fails() {
        let (_dir, workspace) = workspace_with(&[(DEFAULT_CONFIG_FILE, "- site.test\n")]);
        let err = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap_err();
        match err {
            WpenvError::ConfigParseFailed { reason, .. } => {
                assert!(reason.contains("found a list"), "{reason}");
            }
            other => panic!("expected ConfigParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_path_outside_repository_is_rejected() {
        let (_dir, workspace) = workspace_with(&[]);
        let err = FileConfigResolver
            .resolve(&workspace, "../outside.yaml")
            .unwrap_err();
        assert!(matches!(err, WpenvError::ConfigReadFailed { .. }));
    }

    #[test]
    fn test_directory_with_config_name_fails_to_read() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        let workspace = Workspace::new(dir.path());

        let err = FileConfigResolver
            .resolve(&workspace, DEFAULT_CONFIG_FILE)
            .unwrap_err();
        assert!(matches!(err, WpenvError::ConfigReadFailed { .. }));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::of(Path::new("a.json")), Format::Json);
        assert_eq!(Format::of(Path::new("a.JSON")), Format::Json);
        assert_eq!(Format::of(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::of(Path::new("wpenv")), Format::Yaml);
    }
}
