use std::path::Path;

use clientela_core::domain::customer::CustomerId;

use crate::commands::{run_with_service, CommandResult};

pub fn run(config_path: &Path, id: String) -> CommandResult {
    let customer_id = CustomerId(id);
    let display_id = customer_id.clone();

    match run_with_service("delete", config_path, move |service| async move {
        service.delete(&customer_id).await
    }) {
        Ok(()) => CommandResult::success("delete", format!("customer {display_id} deleted")),
        Err(result) => result,
    }
}
