use crate::config::{DATASET_EXTENSIONS, TOPOLOGY_EXTENSIONS};
use crate::core::ConfigProvider;
use crate::utils::error::{DiagramError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub project: ProjectConfig,
    pub inputs: InputsConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub diagrams: DiagramsConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    pub dataset: String,
    pub nodes: Option<String>,
    pub elements: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramsConfig {
    #[serde(default = "enabled")]
    pub profile: bool,
    #[serde(default = "enabled")]
    pub scene: bool,
}

fn enabled() -> bool {
    true
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            profile: true,
            scene: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// `compact` (default) or `json`.
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiagramError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiagramError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_file_extension("inputs.dataset", &self.inputs.dataset, &DATASET_EXTENSIONS)?;
        validation::validate_path("output.path", &self.output.path)?;

        if !self.diagrams.profile && !self.diagrams.scene {
            return Err(DiagramError::ValidationError {
                message: "at least one of diagrams.profile or diagrams.scene must be enabled"
                    .to_string(),
            });
        }

        if self.diagrams.scene {
            let nodes = validation::validate_required_field("inputs.nodes", &self.inputs.nodes)?;
            let elements =
                validation::validate_required_field("inputs.elements", &self.inputs.elements)?;
            validation::validate_file_extension("inputs.nodes", nodes, &TOPOLOGY_EXTENSIONS)?;
            validation::validate_file_extension("inputs.elements", elements, &TOPOLOGY_EXTENSIONS)?;
        }

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            validation::validate_one_of("monitoring.log_format", format, &["compact", "json"])?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|format| format == "json")
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_path(&self) -> &str {
        &self.inputs.dataset
    }

    fn nodes_path(&self) -> Option<&str> {
        self.inputs.nodes.as_deref()
    }

    fn elements_path(&self) -> Option<&str> {
        self.inputs.elements.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn open_figures(&self) -> bool {
        self.output.open.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[project]
name = "screening"
description = "Deck girder screening"

[inputs]
dataset = "data/screening_task.json"
nodes = "data/nodes.json"
elements = "data/elements.json"

[output]
path = "./figures"
open = true

[monitoring]
enabled = true
log_format = "json"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.project.name, "screening");
        assert_eq!(config.dataset_path(), "data/screening_task.json");
        assert_eq!(config.nodes_path(), Some("data/nodes.json"));
        assert!(config.open_figures());
        assert!(config.diagrams.profile && config.diagrams.scene);
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GIRDER_TEST_DATA_DIR", "/srv/bridge");

        let toml_content = r#"
[project]
name = "env"

[inputs]
dataset = "${GIRDER_TEST_DATA_DIR}/screening_task.csv"

[output]
path = "./figures"

[diagrams]
scene = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.inputs.dataset, "/srv/bridge/screening_task.csv");
        assert!(config.diagrams.profile);
        assert!(config.validate().is_ok());

        std::env::remove_var("GIRDER_TEST_DATA_DIR");
    }

    #[test]
    fn test_scene_without_topology_fails_validation() {
        let toml_content = r#"
[project]
name = "missing topology"

[inputs]
dataset = "screening_task.json"

[output]
path = "./figures"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DiagramError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let netcdf = BASIC.replace("screening_task.json", "screening_task.nc");
        assert!(TomlConfig::from_toml_str(&netcdf).unwrap().validate().is_err());

        let xml_logs = BASIC.replace("\"json\"", "\"xml\"");
        assert!(TomlConfig::from_toml_str(&xml_logs).unwrap().validate().is_err());

        let nothing = format!("{}\n[diagrams]\nprofile = false\nscene = false\n", BASIC);
        assert!(matches!(
            TomlConfig::from_toml_str(&nothing).unwrap().validate(),
            Err(DiagramError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[project\nname = ").unwrap_err();
        assert!(matches!(err, DiagramError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./figures");
    }
}
