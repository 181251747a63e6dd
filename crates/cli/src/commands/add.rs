use std::path::Path;

use serde_json::json;

use clientela_core::domain::customer::CustomerDraft;

use crate::commands::{run_with_service, CommandResult};

pub fn run(config_path: &Path, name: String, email: String, phone: Option<String>) -> CommandResult {
    let draft = CustomerDraft { name, email, phone };

    match run_with_service("add", config_path, move |service| async move {
        service.add(draft).await
    }) {
        Ok(id) => CommandResult::success_with_data(
            "add",
            format!("customer {id} added"),
            json!({ "id": id.0 }),
        ),
        Err(result) => result,
    }
}
