pub mod add;
pub mod delete;
pub mod get;
pub mod list;
pub mod migrate;
pub mod update;

use std::future::Future;
use std::path::Path;

use serde::Serialize;

use clientela_core::config::{AppConfig, LogFormat};
use clientela_core::properties::PropertiesLoader;
use clientela_db::repositories::SqlCustomerRepository;
use clientela_db::{connect_with_settings, connection_url};
use clientela_service::{CustomerService, ServiceError};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Into<Option<serde_json::Value>>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: data.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str, config_path: &Path) -> Result<AppConfig, CommandResult> {
    let loader = PropertiesLoader::new();
    let properties = loader.load(config_path).map_err(|error| {
        CommandResult::failure(command, "config_validation", format!("configuration issue: {error}"), 2)
    })?;
    let config = AppConfig::from_properties(&properties).map_err(|error| {
        CommandResult::failure(command, "config_validation", format!("configuration issue: {error}"), 2)
    })?;
    init_logging(&config);
    Ok(config)
}

pub(crate) fn build_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}

/// Shared wiring for the CRUD commands: load config, start a runtime, open
/// the pool, and run one service operation against it. The pool is closed on
/// both exit paths.
pub(crate) fn run_with_service<T, F, Fut>(
    command: &'static str,
    config_path: &Path,
    op: F,
) -> Result<T, CommandResult>
where
    F: FnOnce(CustomerService<SqlCustomerRepository>) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let config = load_config(command, config_path)?;
    let runtime = build_runtime(command)?;

    runtime.block_on(async {
        let pool = connect_with_settings(
            &connection_url(&config.database),
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| {
            CommandResult::failure(command, "db_connectivity", error.to_string(), 4)
        })?;

        let service = CustomerService::new(SqlCustomerRepository::new(pool.clone()));
        let result = op(service).await;
        pool.close().await;

        result.map_err(|error| match error {
            ServiceError::Validation(_) => {
                CommandResult::failure(command, "validation", error.to_string(), 5)
            }
            ServiceError::Storage(_) => {
                CommandResult::failure(command, "storage", error.to_string(), 4)
            }
            ServiceError::NotFound { .. } => {
                CommandResult::failure(command, "not_found", error.to_string(), 6)
            }
        })
    })
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // try_init: commands may run back to back inside one process (tests).
    let _ = match config.logging.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .compact()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .pretty()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .json()
            .try_init(),
    };
}
