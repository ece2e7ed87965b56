use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;

/// Name of the optional project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "markov.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub mermaid: MermaidConfig,
}

/// Numerical policy for the matrix engine and the stochasticity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Power iteration stops once the summed element-wise change drops to
    /// this value or below.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Hard cap on matrix multiplications per power iteration.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Allowed deviation of each row sum from 1.
    #[serde(default = "default_stochastic_tolerance")]
    pub stochastic_tolerance: f32,
}

impl AnalysisConfig {
    /// Reject tolerances that are not finite and positive, and a zero
    /// iteration cap.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0,
            "analysis.tolerance must be a finite positive number, got {}",
            self.tolerance
        );
        ensure!(
            self.max_iterations > 0,
            "analysis.max_iterations must be at least 1"
        );
        ensure!(
            self.stochastic_tolerance.is_finite() && self.stochastic_tolerance > 0.0,
            "analysis.stochastic_tolerance must be a finite positive number, got {}",
            self.stochastic_tolerance
        );
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            stochastic_tolerance: default_stochastic_tolerance(),
        }
    }
}

/// Front-matter settings for emitted Mermaid diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MermaidConfig {
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_theme")]
    pub look: String,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            theme: default_theme(),
            look: default_theme(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .analysis
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(config)
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("markov/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const fn default_tolerance() -> f32 {
    0.01
}

const fn default_max_iterations() -> usize {
    100
}

const fn default_stochastic_tolerance() -> f32 {
    crate::validate::DEFAULT_STOCHASTIC_TOLERANCE
}

fn default_layout() -> String {
    "elk".to_string()
}

fn default_theme() -> String {
    "neo".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!((cfg.analysis.tolerance - 0.01).abs() < f32::EPSILON);
        assert_eq!(cfg.analysis.max_iterations, 100);
        assert_eq!(cfg.mermaid.layout, "elk");
        assert_eq!(cfg.mermaid.theme, "neo");
        assert_eq!(cfg.mermaid.look, "neo");
    }

    #[test]
    fn partial_project_config_fills_defaults() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "[analysis]\nmax_iterations = 250\n\n[mermaid]\ntheme = \"forest\"\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.analysis.max_iterations, 250);
        assert!((cfg.analysis.tolerance - 0.01).abs() < f32::EPSILON);
        assert_eq!(cfg.mermaid.theme, "forest");
        assert_eq!(cfg.mermaid.layout, "elk");
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "[analysis\n").expect("write");

        let err = load_project_config(root.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn out_of_range_analysis_settings_are_rejected() {
        for body in [
            "[analysis]\ntolerance = -0.5\n",
            "[analysis]\ntolerance = nan\n",
            "[analysis]\ntolerance = 0.0\n",
            "[analysis]\nmax_iterations = 0\n",
            "[analysis]\nstochastic_tolerance = inf\n",
        ] {
            let root = tempfile::tempdir().expect("temp dir");
            std::fs::write(root.path().join(PROJECT_CONFIG_FILE), body).expect("write");

            let err = load_project_config(root.path()).unwrap_err();
            assert!(
                format!("{err:#}").contains("Invalid settings"),
                "accepted {body:?}"
            );
        }
    }

    #[test]
    fn default_analysis_settings_validate() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_user_config() {
        let output = resolve_output(false, Some("json".to_string()), Some("text".to_string()));
        assert_eq!(output, "text");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        let pretty = resolve_output(false, Some("table".to_string()), Some("human".to_string()));
        assert_eq!(pretty, "pretty");

        let text = resolve_output(false, Some("human".to_string()), Some("table".to_string()));
        assert_eq!(text, "text");
    }

    #[test]
    fn user_config_parses_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"\n").expect("parse");
        assert_eq!(cfg.output, Some("json".to_string()));
    }
}
