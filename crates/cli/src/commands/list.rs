use std::path::Path;

use serde_json::json;

use crate::commands::{run_with_service, CommandResult};

pub fn run(config_path: &Path) -> CommandResult {
    match run_with_service("list", config_path, |service| async move {
        service.get_all().await
    }) {
        Ok(customers) => CommandResult::success_with_data(
            "list",
            format!("{} customer(s) stored", customers.len()),
            json!({ "customers": customers }),
        ),
        Err(result) => result,
    }
}
