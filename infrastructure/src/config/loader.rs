//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["gemini-judge.toml", ".gemini-judge.toml"];
const ENV_PREFIX: &str = "GEMINI_JUDGE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GEMINI_JUDGE_*` environment variables
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./gemini-judge.toml` or `./.gemini-judge.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/gemini-judge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path,
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults plus the file layers, lowest priority first.
    fn file_figment(
        global: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_in(project_dir) {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// Get the global config file path
    ///
    /// `$XDG_CONFIG_HOME/gemini-judge/config.toml` (platform equivalent via
    /// `dirs`).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gemini-judge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}*  (sections separated by __)", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./gemini-judge.toml or ./.gemini-judge.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_domain::JudgeModel;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("gemini-judge"));
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(ConfigLoader::file_figment(None, dir.path(), None).unwrap());
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_layer_priority() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(
            &global,
            "[judge]\nmodel = \"gemini-2.5-pro\"\ntimeout_secs = 30\n[log]\npath = \"global.csv\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".gemini-judge.toml"),
            "[judge]\ntimeout_secs = 45\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[log]\npath = \"explicit.csv\"\n").unwrap();

        let config = extract(
            ConfigLoader::file_figment(Some(&global), dir.path(), Some(&explicit)).unwrap(),
        );

        assert_eq!(config.judge.parse_model().0, Some(JudgeModel::Gemini25Pro));
        assert_eq!(config.judge.timeout_secs, 45);
        assert_eq!(config.log.path, PathBuf::from("explicit.csv"));
        // Untouched keys keep their defaults
        assert_eq!(config.judge.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_project_file_name_precedence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gemini-judge.toml"), "").unwrap();
        std::fs::write(dir.path().join(".gemini-judge.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_in(dir.path()),
            Some(dir.path().join("gemini-judge.toml"))
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigLoader::file_figment(None, dir.path(), Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[judge\nmodel = ").unwrap();
        let figment = ConfigLoader::file_figment(None, dir.path(), Some(&bad)).unwrap();
        assert!(figment.extract::<FileConfig>().is_err());
    }
}
