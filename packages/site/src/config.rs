use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Development,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => AppMode::Development,
            _ => AppMode::Production, // Default to production for safety
        }
    }

    pub fn is_dev(self) -> bool {
        self == AppMode::Development
    }
}

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub mode: AppMode,
    pub host: String,
    pub port: u16,
    /// Absolute origin used for canonical and hreflang URLs.
    pub site_url: String,
    pub build_id: String,
    pub root_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let port = match env("PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!("PORT is not a valid port number, using 3000");
                3000
            }
            None => 3000,
        };
        let root_dir = env("ROOT_DIR")
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            mode: AppMode::from_env(),
            host: env("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            site_url: env("SITE_URL")
                .unwrap_or_else(|| "https://nemetz.de".to_string())
                .trim_end_matches('/')
                .to_string(),
            build_id: env("BUILD_ID").unwrap_or_else(|| "local-dev".to_string()),
            root_dir,
        }
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root_dir.join("dist")
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root_dir.join("public")
    }

    /// Directory that static assets are served from in the current mode.
    pub fn static_dir(&self) -> PathBuf {
        if self.mode.is_dev() {
            self.public_dir()
        } else {
            self.dist_dir()
        }
    }

    pub fn locale_dir(&self) -> PathBuf {
        self.static_dir().join("i18n")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_app_mode_defaults_to_production() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var("APP_MODE");
        assert_eq!(AppMode::from_env(), AppMode::Production);
    }

    #[test]
    fn test_app_mode_development_aliases() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for value in ["development", "DEV", "local"] {
            std::env::set_var("APP_MODE", value);
            assert_eq!(AppMode::from_env(), AppMode::Development, "{value}");
        }
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_app_mode_invalid_defaults_to_production() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("APP_MODE", "invalid");
        assert_eq!(AppMode::from_env(), AppMode::Production);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_server_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in ["APP_MODE", "HOST", "PORT", "SITE_URL", "BUILD_ID", "ROOT_DIR"] {
            std::env::remove_var(key);
        }
        let config = ServerConfig::from_env();
        assert_eq!(config.mode, AppMode::Production);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.site_url, "https://nemetz.de");
        assert_eq!(config.build_id, "local-dev");
    }

    #[test]
    fn test_locale_dir_follows_mode() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("ROOT_DIR", "/srv/site");
        std::env::set_var("APP_MODE", "dev");
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("SITE_URL", "https://example.com/");
        let config = ServerConfig::from_env();
        assert_eq!(config.locale_dir(), PathBuf::from("/srv/site/public/i18n"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.site_url, "https://example.com");

        std::env::set_var("APP_MODE", "production");
        let config = ServerConfig::from_env();
        assert_eq!(config.locale_dir(), PathBuf::from("/srv/site/dist/i18n"));

        for key in ["ROOT_DIR", "APP_MODE", "PORT", "SITE_URL"] {
            std::env::remove_var(key);
        }
    }
}
