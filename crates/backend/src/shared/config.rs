use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Источник начальных данных; без `path` используется встроенный набор
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    pub path: Option<String>,
}

/// Встроенная конфигурация: используется, если рядом с бинарником нет config.toml
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[seed]
"#;

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// `config.toml` рядом с исполняемым файлом, иначе встроенные значения
pub fn load_config() -> anyhow::Result<Config> {
    match exe_dir().map(|dir| dir.join("config.toml")) {
        Some(path) if path.exists() => {
            tracing::info!("Config: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        }
        Some(path) => {
            tracing::warn!("Config: {} not found, using embedded defaults", path.display());
            Ok(toml::from_str(DEFAULT_CONFIG)?)
        }
        None => {
            tracing::warn!("Config: executable directory unknown, using embedded defaults");
            Ok(toml::from_str(DEFAULT_CONFIG)?)
        }
    }
}

/// Путь к файлу начальных данных.
/// Относительный путь разрешается от каталога исполняемого файла.
pub fn get_seed_path(config: &Config) -> Option<PathBuf> {
    let seed_path = Path::new(config.seed.path.as_deref()?);
    if seed_path.is_absolute() {
        return Some(seed_path.to_path_buf());
    }
    Some(match exe_dir() {
        Some(dir) => dir.join(seed_path),
        None => seed_path.to_path_buf(),
    })
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(get_seed_path(&config).is_none());
    }

    #[test]
    fn test_absolute_seed_path_is_kept() {
        let config: Config = toml::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[seed]
path = "/srv/translations/seed.json"
"#,
        )
        .unwrap();
        assert_eq!(
            get_seed_path(&config),
            Some(PathBuf::from("/srv/translations/seed.json"))
        );
    }

    #[test]
    fn test_seed_section_is_optional() {
        let config: Config = toml::from_str("[server]\nhost = \"localhost\"\nport = 3001\n").unwrap();
        assert!(config.seed.path.is_none());
    }
}
