//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".occupancy-deck/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default = "Output::unset")]
    pub output: Output,
    #[serde(default = "Assets::unset")]
    pub assets: Assets,
}

/// Where the presentation is written and who it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    creator: Option<String>,
}

impl Output {
    fn default_path() -> PathBuf {
        PathBuf::from("Presentazione_Occupazione_Stanza.pptx")
    }

    fn default_creator() -> &'static str {
        "occupancy-deck"
    }

    /// Empty section, so a layer without `[output]` leaves lower layers intact.
    fn unset() -> Self {
        Self {
            path: None,
            creator: None,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(Self::default_path)
    }

    pub fn creator(&self) -> String {
        self.creator
            .clone()
            .unwrap_or_else(|| Self::default_creator().to_owned())
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            path: Some(Self::default_path()),
            creator: Some(Self::default_creator().to_owned()),
        }
    }
}

/// Location of the optional chart images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default)]
    plots_dir: Option<PathBuf>,
}

impl Assets {
    fn default_plots_dir() -> PathBuf {
        PathBuf::from("plots")
    }

    fn unset() -> Self {
        Self { plots_dir: None }
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.plots_dir
            .clone()
            .unwrap_or_else(Self::default_plots_dir)
    }

    pub fn set_plots_dir(&mut self, dir: impl Into<PathBuf>) {
        self.plots_dir = Some(dir.into());
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            plots_dir: Some(Self::default_plots_dir()),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output: Option<String>,
    plots_dir: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output: env::var("OCCUPANCY_DECK_OUTPUT").ok(),
            plots_dir: env::var("OCCUPANCY_DECK_PLOTS_DIR").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output: &str, plots_dir: &str) -> Self {
        Self {
            output: Some(output.to_owned()),
            plots_dir: Some(plots_dir.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            output: merge_output(self.output, other.output),
            assets: merge_assets(self.assets, other.assets),
        }
    }
}

fn merge_output(mut base: Output, overlay: Output) -> Output {
    if let Some(value) = overlay.path {
        base.path = Some(value);
    }
    if let Some(value) = overlay.creator {
        base.creator = Some(value);
    }
    base
}

fn merge_assets(mut base: Assets, overlay: Assets) -> Assets {
    if let Some(value) = overlay.plots_dir {
        base.plots_dir = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("occupancy-deck/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(output) = env.output {
        config.output.set_path(output);
    }
    if let Some(plots_dir) = env.plots_dir {
        config.assets.set_plots_dir(plots_dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(
            config.output.path(),
            PathBuf::from("Presentazione_Occupazione_Stanza.pptx")
        );
        assert_eq!(config.output.creator(), "occupancy-deck");
        assert_eq!(config.assets.plots_dir(), PathBuf::from("plots"));
    }

    #[test]
    fn embedded_defaults_match_code_defaults() -> Result<()> {
        assert_eq!(Config::from_str(&DEFAULT_CONFIG)?, Config::default());
        Ok(())
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[output]
path = "global.pptx"
creator = "Laboratorio IoT"
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".occupancy-deck"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".occupancy-deck/config.toml"),
            r#"
[output]
path = "workspace.pptx"
[assets]
plots_dir = "figures"
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".occupancy-deck/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.output.path(), PathBuf::from("workspace.pptx"));
        assert_eq!(config.output.creator(), "Laboratorio IoT");
        assert_eq!(config.assets.plots_dir(), PathBuf::from("figures"));

        Ok(())
    }

    #[test]
    fn missing_section_keeps_lower_layer() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("global.toml");
        fs::write(&global, "[output]\npath = \"global.pptx\"\n")?;
        let workspace = temp.path().join("workspace.toml");
        fs::write(&workspace, "[assets]\nplots_dir = \"figures\"\n")?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;
        assert_eq!(config.output.path(), PathBuf::from("global.pptx"));
        assert_eq!(config.assets.plots_dir(), PathBuf::from("figures"));
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("out/deck.pptx", "charts");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.output.path(), PathBuf::from("out/deck.pptx"));
        assert_eq!(config.assets.plots_dir(), PathBuf::from("charts"));
        Ok(())
    }

    #[test]
    fn repo_root_is_found_from_nested_dir() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let nested = temp.path().join("analysis/notebooks");
        fs::create_dir_all(&nested)?;
        fs::create_dir_all(temp.path().join(".git"))?;
        assert_eq!(find_repo_root(&nested), Some(temp.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
