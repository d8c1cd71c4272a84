use crate::config::AppConfig;
use crate::errors::{AssignEaseError, Result};
use crate::sandbox::{CodeExecutor, Judge0Executor, PistonExecutor};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tracing::warn;

pub type ExecutorConstructor =
    Arc<dyn Fn(&AppConfig) -> Result<Arc<dyn CodeExecutor>> + Send + Sync>;

/// 未配置或配置无效时使用的后端
pub const FALLBACK_EXECUTOR: &str = "piston";

static EXECUTOR_REGISTRY: Lazy<RwLock<HashMap<String, ExecutorConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_executor<S: Into<String>>(name: S, constructor: ExecutorConstructor) {
    let name = name.into();
    let mut registry = EXECUTOR_REGISTRY
        .write()
        .expect("Executor registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_executor(name: &str) -> Option<ExecutorConstructor> {
    EXECUTOR_REGISTRY
        .read()
        .expect("Executor registry lock poisoned")
        .get(name)
        .cloned()
}

/// 注册内置的 judge0 / piston 后端
pub fn register_builtin_executors() {
    register_executor(
        "judge0",
        Arc::new(|config: &AppConfig| -> Result<Arc<dyn CodeExecutor>> {
            let executor = Judge0Executor::from_config(&config.judge0)?;
            Ok(Arc::new(executor) as Arc<dyn CodeExecutor>)
        }),
    );
    register_executor(
        "piston",
        Arc::new(|config: &AppConfig| -> Result<Arc<dyn CodeExecutor>> {
            let executor = PistonExecutor::from_config(&config.piston)?;
            Ok(Arc::new(executor) as Arc<dyn CodeExecutor>)
        }),
    );
}

/// 按 `grading.backend` 创建执行后端，失败时回退到 piston
pub fn create_executor(config: &AppConfig) -> Result<Arc<dyn CodeExecutor>> {
    let backend = config.grading.backend.trim().to_lowercase();

    warn!("Attempting to create {} execution backend", backend);

    match get_executor(&backend) {
        Some(constructor) => match constructor(config) {
            Ok(executor) => return Ok(executor),
            Err(e) => warn!("Failed to create {} executor: {}", backend, e),
        },
        None => warn!("Execution backend '{}' not found in registry", backend),
    }

    if backend != FALLBACK_EXECUTOR {
        warn!("Falling back to {} executor", FALLBACK_EXECUTOR);
        if let Some(constructor) = get_executor(FALLBACK_EXECUTOR) {
            return constructor(config);
        }
    }

    Err(AssignEaseError::executor_not_found(format!(
        "没有可用的执行后端 (tried: {backend})"
    )))
}

pub fn debug_executor_registry() {
    let registry = EXECUTOR_REGISTRY
        .read()
        .expect("Executor registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No execution backends registered.");
    } else {
        tracing::debug!("Registered execution backends:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_backend(backend: &str) -> AppConfig {
        let mut config = AppConfig::from_defaults().expect("defaults should deserialize");
        config.grading.backend = backend.to_string();
        config
    }

    #[test]
    fn test_selects_configured_backend() {
        register_builtin_executors();
        let executor = create_executor(&config_with_backend("Judge0")).unwrap();
        assert_eq!(executor.name(), "judge0");
    }

    #[test]
    fn test_unknown_backend_falls_back_to_piston() {
        register_builtin_executors();
        let executor = create_executor(&config_with_backend("docker")).unwrap();
        assert_eq!(executor.name(), "piston");
    }

    #[test]
    fn test_custom_backend_can_be_registered() {
        register_builtin_executors();
        register_executor(
            "judge0-mirror",
            Arc::new(|config: &AppConfig| -> Result<Arc<dyn CodeExecutor>> {
                let executor = Judge0Executor::from_config(&config.judge0)?;
                Ok(Arc::new(executor) as Arc<dyn CodeExecutor>)
            }),
        );
        assert!(get_executor("judge0-mirror").is_some());
        let executor = create_executor(&config_with_backend("judge0-mirror")).unwrap();
        assert_eq!(executor.name(), "judge0");
    }
}
