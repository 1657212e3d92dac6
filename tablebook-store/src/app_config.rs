use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

// Mirrors bcrypt's private MIN_COST/MAX_COST (bcrypt 0.17 src/lib.rs).
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

fn default_token_ttl() -> u64 { 24 * 60 * 60 }
fn default_bcrypt_cost() -> u32 { 10 }
fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layers `<dir>/default`, `<dir>/<RUN_MODE>`, `<dir>/local` and then
    /// `TABLEBOOK__*` environment variables.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(config::Environment::with_prefix("TABLEBOOK").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;

        // Tokens can be neither issued nor verified without a signing secret.
        if config.auth.jwt_secret.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "auth.jwt_secret must be set".to_string(),
            ));
        }

        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&config.auth.bcrypt_cost) {
            return Err(config::ConfigError::Message(format!(
                "auth.bcrypt_cost must be between {} and {}, got {}",
                BCRYPT_MIN_COST,
                BCRYPT_MAX_COST,
                config.auth.bcrypt_cost
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    const SECRET_VAR: &str = "TABLEBOOK__AUTH__JWT_SECRET";

    fn write_default(dir: &tempfile::TempDir, auth: &str) {
        let toml = format!(
            "[server]\nport = 8080\n\n\
             [database]\nurl = \"postgres://localhost/test\"\n\n\
             [auth]\n{}\n",
            auth
        );
        fs::write(dir.path().join("default.toml"), toml).unwrap();
    }

    fn load(dir: &tempfile::TempDir) -> Result<Config, config::ConfigError> {
        Config::load_from(dir.path().to_str().unwrap())
    }

    /// Clears the variable on drop so a failed assertion cannot leak it.
    struct EnvVar(&'static str);

    impl EnvVar {
        fn set(name: &'static str, value: &str) -> Self {
            env::set_var(name, value);
            Self(name)
        }
    }

    impl Drop for EnvVar {
        fn drop(&mut self) {
            env::remove_var(self.0);
        }
    }

    #[test]
    #[serial]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_default(&dir, "jwt_secret = \"s3cret\"");

        let config = load(&dir).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.token_ttl_seconds, 86_400);
        assert_eq!(config.auth.bcrypt_cost, 10);
    }

    #[test]
    #[serial]
    fn test_load_rejects_missing_secret() {
        let dir = tempfile::tempdir().unwrap();
        write_default(&dir, "jwt_secret = \"  \"");

        let err = load(&dir).unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    #[serial]
    fn test_env_supplies_secret() {
        let dir = tempfile::tempdir().unwrap();
        write_default(&dir, "jwt_secret = \"\"");
        let _guard = EnvVar::set(SECRET_VAR, "from-env");

        let config = load(&dir).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-env");
    }

    #[test]
    #[serial]
    fn test_load_rejects_bcrypt_cost_out_of_range() {
        for cost in [0, 3, 32] {
            let dir = tempfile::tempdir().unwrap();
            write_default(&dir, &format!("jwt_secret = \"s\"\nbcrypt_cost = {}", cost));

            let err = load(&dir).unwrap_err();
            assert!(err.to_string().contains("bcrypt_cost"), "cost {} accepted", cost);
        }

        let dir = tempfile::tempdir().unwrap();
        write_default(&dir, "jwt_secret = \"s\"\nbcrypt_cost = 4");
        assert_eq!(load(&dir).unwrap().auth.bcrypt_cost, 4);
    }
}
