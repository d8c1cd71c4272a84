use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults(Config::builder())?
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
                Environment::with_prefix("ASSIGNEASE")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("judge0.base_url", std::env::var("JUDGE0_URL").ok())?
            .set_override_option("piston.base_url", std::env::var("PISTON_URL").ok())?
            .set_override_option("llm.endpoint", std::env::var("LLM_ENDPOINT").ok())?
            .set_override_option("llm.model", std::env::var("LLM_MODEL").ok())?
            .set_override_option("grading.backend", std::env::var("GRADING_BACKEND").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 代码内置默认值
    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.system_name", "AssignEase Grader")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 8)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 30)?
            .set_default("server.limits.max_payload_size", 1_048_576)?
            .set_default("database.url", "assignease.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.timeout", 30)?
            .set_default("cors.allowed_origins", vec!["*"])?
            .set_default(
                "cors.allowed_methods",
                vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"],
            )?
            .set_default(
                "cors.allowed_headers",
                vec!["Content-Type", "Authorization", "Accept"],
            )?
            .set_default("cors.max_age", 3600)?
            .set_default("judge0.base_url", "http://localhost:2358")?
            .set_default("judge0.request_timeout", 30)?
            .set_default("piston.base_url", "http://localhost:2000")?
            .set_default("piston.request_timeout", 30)?
            .set_default("llm.endpoint", "http://localhost:11434")?
            .set_default("llm.model", "llama3:8b-instruct-q4_0")?
            .set_default("llm.request_timeout", 180)?
            .set_default("llm.retries", 1)?
            .set_default("llm.retry_backoff_ms", 1000)?
            .set_default("llm.num_predict", 256)?
            .set_default("grading.backend", "piston")
    }

    /// 仅由内置默认值构建，不读取配置文件和环境变量
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
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
    fn test_defaults_deserialize_without_files() {
        let config = AppConfig::from_defaults().expect("defaults should form a complete config");

        assert_eq!(config.grading.backend, "piston");
        assert_eq!(config.llm.model, "llama3:8b-instruct-q4_0");
        assert_eq!(config.llm.retries, 1);
        assert_eq!(config.llm.num_predict, 256);
        assert_eq!(config.piston.request_timeout, 30);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(config.is_development());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }
}
