use crate::ai::AiGrader;
use crate::config::AppConfig;
use crate::events::{DEFAULT_CHANNEL_CAPACITY, EventDispatcher};
use crate::sandbox::CodeExecutor;
use crate::sandbox::register::{create_executor, register_builtin_executors};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub executor: Arc<dyn CodeExecutor>,
    pub grader: Arc<AiGrader>,
    pub dispatcher: EventDispatcher,
}

/// 准备服务器启动的上下文
/// 包括存储、执行后端、AI 评分器和事件分发器
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    register_builtin_executors();
    if cfg!(debug_assertions) {
        crate::sandbox::register::debug_executor_registry();
        debug!("Debug mode: Executor registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let executor = create_executor(config).expect("Failed to create execution backend");
    warn!("Execution backend initialized: {}", executor.name());

    let grader = AiGrader::from_config(&config.llm).expect("Failed to create AI grader");
    warn!(
        "AI grader initialized with model {} ({} retries)",
        grader.model_name(),
        config.llm.retries
    );

    let dispatcher = EventDispatcher::new(storage.clone(), DEFAULT_CHANNEL_CAPACITY);

    StartupContext {
        storage,
        executor,
        grader: Arc::new(grader),
        dispatcher,
    }
}
