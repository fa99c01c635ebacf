// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub const DEFAULT_APP_NAME: &str = "Study Assistant";

/// Settings read from a TOML file, e.g.:
///
/// ```toml
/// app_name = "Biology Club"
/// output_dir = "exports"
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Shown in document titles and footers.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Where exported files are written when no directory is given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            output_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn from_toml(text: &str) -> Fallible<Self> {
        let config: ExportConfig = toml::from_str(text)?;
        if config.app_name.trim().is_empty() {
            return Err(ErrorReport::new("app_name must not be empty"));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Fallible<Self> {
        let text = read_to_string(path).map_err(|e| {
            ErrorReport::new(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() -> Fallible<()> {
        assert_eq!(ExportConfig::from_toml("")?, ExportConfig::default());
        Ok(())
    }

    #[test]
    fn test_full_file() -> Fallible<()> {
        let config = ExportConfig::from_toml("app_name = \"Biology Club\"\noutput_dir = \"exports\"\n")?;
        assert_eq!(config.app_name, "Biology Club");
        assert_eq!(config.output_dir, Some(PathBuf::from("exports")));
        Ok(())
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ExportConfig::from_toml("page_size = \"letter\"").is_err());
    }

    #[test]
    fn test_blank_app_name_rejected() {
        assert!(ExportConfig::from_toml("app_name = \" \"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExportConfig::load(Path::new("./does-not-exist.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_load_from_disk() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("studydocs.toml");
        std::fs::write(&path, "app_name = \"Night School\"")?;
        assert_eq!(ExportConfig::load(&path)?.app_name, "Night School");
        Ok(())
    }
}
