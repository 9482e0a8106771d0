use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use tracing::warn;

/// The three deployable services; each owns its own SQLite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Library,
    Profiles,
    Directory,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Library => "library",
            ServiceKind::Profiles => "profiles",
            ServiceKind::Directory => "directory",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Library => 8081,
            ServiceKind::Profiles => 8082,
            ServiceKind::Directory => 8083,
        }
    }

    pub fn default_database_url(self) -> String {
        format!("sqlite://data/{}.db?mode=rwc", self.name())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub library: ServiceOverrides,
    #[serde(default)]
    pub profiles: ServiceOverrides,
    #[serde(default)]
    pub directory: ServiceOverrides,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: None, worker_threads: Some(4) }
    }
}

/// Per-service `[library]`, `[profiles]`, `[directory]` sections.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServiceOverrides {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Fully resolved settings for one service process.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub kind: ServiceKind,
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    pub database: DatabaseConfig,
}

impl ServiceSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

/// `Ok(None)` when no file exists at `path`; a file that exists but does not
/// parse is an error.
pub fn load_optional(path: &str) -> Result<Option<AppConfig>> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }
    load_from_file(path).map(Some)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults.
    /// A present but malformed file is reported and then ignored.
    pub fn load_or_default() -> Self {
        let path = config_path();
        match load_optional(&path) {
            Ok(cfg) => cfg.unwrap_or_default(),
            Err(e) => {
                warn!(%path, error = %e, "config file could not be parsed; using defaults");
                Self::default()
            }
        }
    }

    fn overrides(&self, kind: ServiceKind) -> &ServiceOverrides {
        match kind {
            ServiceKind::Library => &self.library,
            ServiceKind::Profiles => &self.profiles,
            ServiceKind::Directory => &self.directory,
        }
    }

    /// Resolve settings for one service.
    ///
    /// Precedence: service section, then `[server]`/`[database]`, then
    /// `SERVER_HOST`/`SERVER_PORT`/`DATABASE_URL`, then built-in defaults.
    pub fn resolve(&self, kind: ServiceKind) -> Result<ServiceSettings> {
        let ov = self.overrides(kind);

        let mut host = self.server.host.clone();
        if host.trim().is_empty() {
            host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        }

        let port = ov
            .port
            .or(self.server.port)
            .or_else(|| std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or_else(|| kind.default_port());
        if port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }

        let worker_threads = match self.server.worker_threads {
            Some(0) | None => Some(4),
            w => w,
        };

        let mut database = self.database.clone();
        if let Some(url) = ov.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            database.url = url.clone();
        }
        database.normalize_from_env();
        if database.url.trim().is_empty() {
            database.url = kind.default_database_url();
        }
        database.validate()?;

        Ok(ServiceSettings { kind, host, port, worker_threads, database })
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    /// In-memory settings used by tests; a single connection keeps one shared database.
    pub fn in_memory() -> Self {
        Self { url: "sqlite::memory:".into(), max_connections: 1, min_connections: 1, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_sections_override_shared_values() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "sqlite://shared.db"

            [directory]
            port = 9300
            database_url = "sqlite://dir.db?mode=rwc"
            "#,
        )
        .unwrap();

        let dir = cfg.resolve(ServiceKind::Directory).unwrap();
        assert_eq!(dir.bind_addr(), "0.0.0.0:9300");
        assert_eq!(dir.database.url, "sqlite://dir.db?mode=rwc");

        let lib = cfg.resolve(ServiceKind::Library).unwrap();
        assert_eq!(lib.port, 9000);
        assert_eq!(lib.database.url, "sqlite://shared.db");
    }

    #[test]
    fn non_sqlite_urls_are_rejected() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://localhost/app"
            "#,
        )
        .unwrap();
        assert!(cfg.resolve(ServiceKind::Library).is_err());
    }

    #[test]
    fn pool_bounds_are_validated() {
        let db = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 4, max_connections: 2, ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        assert!(DatabaseConfig::in_memory().validate().is_ok());
    }

    #[test]
    fn missing_file_is_none_but_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("configs-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let absent = dir.join("absent.toml");
        assert!(load_optional(absent.to_str().unwrap()).unwrap().is_none());

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "[server]\nport = \"abc\"\n").unwrap();
        assert!(load_optional(bad.to_str().unwrap()).is_err());

        let good = dir.join("good.toml");
        std::fs::write(&good, "[library]\nport = 9100\n").unwrap();
        let cfg = load_optional(good.to_str().unwrap()).unwrap().unwrap();
        assert_eq!(cfg.library.port, Some(9100));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn defaults_follow_service_kind() {
        assert_eq!(ServiceKind::Profiles.default_port(), 8082);
        assert_eq!(ServiceKind::Profiles.default_database_url(), "sqlite://data/profiles.db?mode=rwc");
    }
}
