use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 内置默认值，保证无配置文件时也能启动
const DEFAULTS: &[(&str, &str)] = &[
    ("app.system_name", "EducaMais"),
    ("app.environment", "development"),
    ("app.log_level", "info"),
    ("server.host", "127.0.0.1"),
    ("server.port", "8080"),
    ("server.unix_socket_path", ""),
    ("server.workers", "0"),
    ("server.max_workers", "16"),
    ("server.timeouts.client_request", "5000"),
    ("server.timeouts.client_disconnect", "1000"),
    ("server.timeouts.keep_alive", "30"),
    ("server.limits.max_payload_size", "1048576"),
    ("session.secret", "change-me-in-production"),
    ("session.cookie_name", "session"),
    ("session.expiry", "120"),
    ("session.remember_me_expiry", "30"),
    ("database.url", "elearning.db"),
    ("database.pool_size", "8"),
    ("database.timeout", "10"),
    ("cache.type", "moka"),
    ("cache.default_ttl", "300"),
    ("cache.redis.url", "redis://127.0.0.1:6379"),
    ("cache.redis.key_prefix", "elearning:"),
    ("cache.redis.pool_size", "8"),
    ("cache.memory.max_capacity", "10000"),
    ("cors.max_age", "3600"),
    ("argon2.memory_cost", "19456"),
    ("argon2.time_cost", "2"),
    ("argon2.parallelism", "1"),
    ("rate_limit.window_secs", "60"),
    ("rate_limit.login", "10"),
    ("rate_limit.register", "5"),
    ("rate_limit.contact", "5"),
];

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for (key, value) in DEFAULTS {
            builder = builder.set_default(*key, *value)?;
        }
        builder = builder.set_default("cors.allowed_origins", Vec::<String>::new())?;

        builder = builder
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("ELEARNING")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("session.secret", std::env::var("SESSION_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert!(config.server.workers >= 1);
        assert!(!config.session.cookie_name.is_empty());
        assert!(config.session.expiry > 0);
        assert_eq!(config.cache.cache_type, "moka");
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(
            config.server_bind_address(),
            format!("{}:{}", config.server.host, config.server.port)
        );
    }
}
