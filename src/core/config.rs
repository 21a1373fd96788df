//! Layered configuration
//!
//! Later layers win field by field: built-in defaults, then the user config
//! (`<config dir>/spc/config.yaml`), then the project config
//! (`.spc/config.yaml` in the working directory). Command-line flags are
//! applied on top by the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::report::DEFAULT_REPORT_FILE;
use crate::entities::limits::RawLimits;
use crate::entities::summary::ChartType;

/// Directory holding the project config
pub const PROJECT_CONFIG_DIR: &str = ".spc";

/// Config file name, shared by user and project layers
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    #[diagnostic(code(spc::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    #[diagnostic(code(spc::config::parse), help("check the YAML syntax and field names"))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// One configuration layer as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default limits applied when none are given on the command line
    #[serde(default)]
    pub limits: RawLimits,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,

    /// Workbook file that reports are merged into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_file: Option<PathBuf>,
}

impl Config {
    /// Load and merge all layers, skipping any that cannot be read
    pub fn load() -> Self {
        let mut paths = Vec::new();
        if let Some(user) = Self::user_config_path() {
            paths.push(user);
        }
        paths.push(Self::project_config_path(Path::new(".")));
        Self::load_layers(&paths)
    }

    /// Merge the given layers in order; missing files are skipped silently
    /// and broken ones with a warning
    pub fn load_layers(paths: &[PathBuf]) -> Self {
        let mut config = Config::default();
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_file(path) {
                Ok(layer) => {
                    tracing::debug!(path = %path.display(), "applied config layer");
                    config = config.merged_with(layer);
                }
                Err(e) => tracing::warn!("{}", e),
            }
        }
        config
    }

    /// Read a single layer
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `other` on top of `self`
    pub fn merged_with(self, other: Config) -> Config {
        Config {
            limits: self.limits.merged_with(&other.limits),
            chart_type: other.chart_type.or(self.chart_type),
            report_file: other.report_file.or(self.report_file),
        }
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type.unwrap_or_default()
    }

    pub fn report_file(&self) -> PathBuf {
        self.report_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE))
    }

    /// Path of the per-user config file, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spc").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Path of the project config under `root`
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Starter project config written by `spc init`
    pub fn template() -> &'static str {
        "# SPC Report project configuration\n\
         #\n\
         # Limits left as ~ are not evaluated unless given on the command line.\n\
         limits:\n\
         \x20 usl: ~ # upper spec limit, e.g. 20\n\
         \x20 lsl: ~ # lower spec limit\n\
         \x20 ucl: ~ # upper control limit\n\
         \x20 lcl: ~ # lower control limit\n\
         \n\
         # Chart type recorded in report rows: X-R or P\n\
         chart_type: X-R\n\
         \n\
         # Workbook that `spc report` merges into\n\
         report_file: SPC_Report.json\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::limits::LimitSet;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chart_type(), ChartType::XR);
        assert_eq!(config.report_file(), PathBuf::from("SPC_Report.json"));
        assert!(config.limits.resolve().is_empty());
    }

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yml::from_str(Config::template()).unwrap();
        assert_eq!(config.chart_type, Some(ChartType::XR));
        assert_eq!(config.report_file, Some(PathBuf::from("SPC_Report.json")));
        assert!(config.limits.resolve().is_empty());
    }

    #[test]
    fn test_project_layer_overrides_user_layer() {
        let tmp = TempDir::new().unwrap();
        let user = tmp.path().join("user.yaml");
        let project = tmp.path().join("project.yaml");
        fs::write(&user, "limits:\n  usl: 20\n  lsl: 0\nchart_type: P\n").unwrap();
        fs::write(&project, "limits:\n  usl: \"25\"\nreport_file: line3.json\n").unwrap();

        let config = Config::load_layers(&[user, project]);
        assert_eq!(
            config.limits.resolve(),
            LimitSet::new(Some(25.0), Some(0.0), None, None)
        );
        assert_eq!(config.chart_type(), ChartType::P);
        assert_eq!(config.report_file(), PathBuf::from("line3.json"));
    }

    #[test]
    fn test_missing_and_broken_layers_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken.yaml");
        let good = tmp.path().join("good.yaml");
        fs::write(&broken, "limits: [not, a, map").unwrap();
        fs::write(&good, "chart_type: P\n").unwrap();

        let config = Config::load_layers(&[tmp.path().join("missing.yaml"), broken, good]);
        assert_eq!(config.chart_type(), ChartType::P);
    }

    #[test]
    fn test_load_file_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "unknown_field: 1\n").unwrap();
        assert!(matches!(Config::load_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load_file(&path).unwrap(), Config::default());
    }
}
