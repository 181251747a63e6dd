use std::path::Path;

use clientela_core::domain::customer::{Customer, CustomerId};

use crate::commands::{run_with_service, CommandResult};

pub fn run(
    config_path: &Path,
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
) -> CommandResult {
    let customer = Customer { id: CustomerId(id), name, email, phone };
    let display_id = customer.id.clone();

    match run_with_service("update", config_path, move |service| async move {
        service.update(&customer).await
    }) {
        Ok(()) => CommandResult::success("update", format!("customer {display_id} updated")),
        Err(result) => result,
    }
}
