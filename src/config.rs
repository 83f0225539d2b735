use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConvoFixError;

const DB_FILENAME: &str = "conversations.db";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseConfig {
    /// Absolute path to the conversations database. When unset, the database
    /// is looked up as `conversations.db` under the platform data directory.
    pub path: Option<String>,
}

impl DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig { path: None }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads the configuration from a TOML file located in the app's data
    /// directory, merged with `CONVOFIX_`-prefixed environment variables.
    /// If the file is missing or fails to parse, defaults are used.
    pub fn load_config(project_dirs: &ProjectDirs) -> Self {
        Self::load_from(&project_dirs.data_local_dir().join("config.toml"))
    }

    fn load_from(config_path: &Path) -> Self {
        let default_config = Config {
            database: DatabaseConfig::default(),
        };

        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CONVOFIX_").split("_"));

        // Attempt to extract the configuration; on error, log a message and fall back to defaults.
        figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load config file {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        })
    }

    /// Resolves the path to the conversations database: the configured
    /// override when present, the platform data directory default otherwise.
    pub fn resolve_db_path() -> Result<PathBuf, ConvoFixError> {
        let project_dirs = ProjectDirs::from("", "", "convofix").ok_or_else(|| {
            ConvoFixError::Error("Could not determine the platform data directory".to_string())
        })?;

        let config = Self::load_config(&project_dirs);
        match config.database.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(project_dirs.data_local_dir().join(DB_FILENAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_file_or_env() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Path::new("config.toml"));
            assert!(config.database.path.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_toml_override_selects_db_path() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [database]
                    path = "/tmp/from-toml.db"
                "#,
            )?;

            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config.database.path.as_deref(), Some("/tmp/from-toml.db"));
            Ok(())
        });
    }

    #[test]
    fn test_env_override_wins_over_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [database]
                    path = "/tmp/from-toml.db"
                "#,
            )?;
            jail.set_env("CONVOFIX_DATABASE_PATH", "/tmp/from-env.db");

            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config.database.path.as_deref(), Some("/tmp/from-env.db"));
            Ok(())
        });
    }
}
