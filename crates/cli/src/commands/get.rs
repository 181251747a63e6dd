use std::path::Path;

use serde_json::json;

use clientela_core::domain::customer::CustomerId;

use crate::commands::{run_with_service, CommandResult};

pub fn run(config_path: &Path, id: String) -> CommandResult {
    let customer_id = CustomerId(id);
    let lookup_id = customer_id.clone();

    match run_with_service("get", config_path, move |service| async move {
        service.get(&lookup_id).await
    }) {
        // No match is a valid empty result, not an error.
        Ok(None) => CommandResult::success_with_data(
            "get",
            format!("customer {customer_id} not found"),
            json!({ "customer": null }),
        ),
        Ok(Some(customer)) => CommandResult::success_with_data(
            "get",
            format!("customer {customer_id} found"),
            json!({ "customer": customer }),
        ),
        Err(result) => result,
    }
}
