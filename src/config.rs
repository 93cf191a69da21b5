use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Runtime configuration, read from `BLOTTER_*` environment variables on top
/// of the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Mark the session cookie `Secure`. Enable when served behind TLS.
    pub secure_cookie: bool,
    /// Editor account created at startup. Both must be set, otherwise provisioning is skipped.
    pub editor_username: Option<String>,
    #[serde(skip_serializing)]
    pub editor_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:blotter.db".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
            secure_cookie: false,
            editor_username: None,
            editor_password: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("BLOTTER_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_provisioning_unset() {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(cfg.database_url, "sqlite:blotter.db");
        assert!(!cfg.secure_cookie);
        assert!(cfg.editor_username.is_none());
        assert!(cfg.editor_password.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BLOTTER_LISTEN_ADDR", "127.0.0.1:9000");
            jail.set_env("BLOTTER_SECURE_COOKIE", "true");
            jail.set_env("BLOTTER_EDITOR_USERNAME", "editor");
            jail.set_env("BLOTTER_EDITOR_PASSWORD", "hunter2");

            let cfg = Config::load()?;
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert!(cfg.secure_cookie);
            assert_eq!(cfg.editor_username.as_deref(), Some("editor"));
            assert_eq!(cfg.editor_password.as_deref(), Some("hunter2"));
            Ok(())
        });
    }
}
