use std::path::Path;

use clientela_db::{connect_with_settings, connection_url, migrations};

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run(config_path: &Path) -> CommandResult {
    let config = match load_config("migrate", config_path) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("migrate") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &connection_url(&config.database),
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 4u8))?;
        pool.close().await;
        Ok::<(), (&'static str, String, u8)>(())
    });

    match result {
        Ok(()) => CommandResult::success("migrate", "applied pending migrations"),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("migrate", error_class, message, exit_code)
        }
    }
}
