use crate::client::CustomerApiClient;
use crate::customers;
use crate::environments::{environment_config, Environment};
use crate::errors::{format_validation_failure, ApiError};
use crate::models::customer::{
    CreateCustomerRequest, CustomerInstance, CustomerList, InstanceStatus, UpdateCustomerRequest,
};
use crate::models::outcome::{ApiOutcome, ReadyOutcome};
use colored::*;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Value of the `managed-by` label on every customer created by this tool
pub const MANAGED_BY: &str = "agectl";

fn not_found_message(name: &str) -> String {
    format!("❌ Customer '{}' not found", name)
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn ready_icon(ready: bool) -> &'static str {
    if ready {
        "✅"
    } else {
        "⏳"
    }
}

/// Builds the create payload from the `create` arguments.
///
/// The environment expands to its predefined config and is recorded as `environment` label,
/// next to `managed-by` and the optional `team`. Additional labels are applied last.
pub fn build_create_request(
    name: &str,
    display_name: Option<&str>,
    image_tag: &str,
    environment: Environment,
    team: Option<&str>,
    extra_labels: &[(String, String)],
) -> CreateCustomerRequest {
    let mut labels = BTreeMap::new();
    labels.insert("environment".to_string(), environment.to_string());
    labels.insert("managed-by".to_string(), MANAGED_BY.to_string());
    if let Some(team) = team {
        labels.insert("team".to_string(), team.to_string());
    }
    labels.extend(extra_labels.iter().cloned());

    CreateCustomerRequest::new(
        name,
        display_name,
        image_tag,
        Some(environment_config(environment)),
        Some(labels),
    )
}

/// Builds a partial update that contains only the given fields.
pub fn build_update_request(
    display_name: Option<&str>,
    image_tag: Option<&str>,
    environment: Option<Environment>,
    labels: &[(String, String)],
) -> UpdateCustomerRequest {
    UpdateCustomerRequest {
        display_name: display_name.map(str::to_string),
        image_tag: image_tag.map(str::to_string),
        config: environment.map(environment_config),
        labels: if labels.is_empty() {
            None
        } else {
            Some(labels.iter().cloned().collect())
        },
    }
}

/// Renders one page of customers as printed by `list`.
pub fn format_customer_list(list: &CustomerList, page_size: u32) -> String {
    if list.customers.is_empty() {
        return "📭 No customers found".to_string();
    }

    let mut output = format!(
        "📋 Customers (Page {}/{}):\n\n",
        list.page,
        CustomerList::total_pages(list.total, page_size)
    );
    for customer in &list.customers {
        output.push_str(&format!(
            "{} {}\n   Display Name: {}\n   Status: {}\n   Namespace: {}\n   Image Tag: {}\n   Created: {}\n\n",
            ready_icon(customer.status.ready),
            customer.name,
            or_na(&customer.display_name),
            customer.status.phase,
            customer.namespace,
            or_na(&customer.image_tag),
            customer.created_at.to_rfc3339(),
        ));
    }
    output.push_str(&format!("Total: {} customers", list.total));
    if list.has_next {
        output.push_str(&format!(
            "\nMore customers available, use --page {}",
            list.page + 1
        ));
    }
    output
}

/// Renders the status block as printed by `status`.
pub fn format_status(name: &str, status: &InstanceStatus) -> String {
    let mut output = format!(
        "{} Customer: {}\n   Phase: {}\n   Ready: {}\n   Replicas: {}/{}",
        ready_icon(status.ready),
        name,
        status.phase,
        status.ready,
        status.replicas,
        status.ready_replicas,
    );
    if !status.message.is_empty() {
        output.push_str(&format!("\n   Message: {}", status.message));
    }
    output.push_str(&format!(
        "\n   Last Updated: {}",
        status.last_updated.to_rfc3339()
    ));
    output
}

fn print_customer(customer: &CustomerInstance) -> Result<(), ApiError> {
    println!("{}", serde_json::to_string_pretty(customer)?);
    Ok(())
}

/// Asks on `input` whether the customer should really be deleted. Only `y` confirms.
pub fn confirm_deletion<R: BufRead>(name: &str, input: &mut R) -> io::Result<bool> {
    print!(
        "⚠️  Are you sure you want to delete customer '{}'? (y/N): ",
        name
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Creates a customer and optionally waits until it is ready.
///
/// Returns the result of the wait, or `None` if the instance wasn't created or waited for.
pub async fn cmd_create(
    client: &CustomerApiClient,
    request: &CreateCustomerRequest,
    wait: bool,
    timeout: Duration,
) -> Result<Option<ReadyOutcome>, ApiError> {
    println!("🚀 Creating customer: {}", request.name);

    let customer = match customers::create_customer(client, request).await? {
        ApiOutcome::Found(customer) => customer,
        ApiOutcome::Invalid(error) => {
            println!("{}", format_validation_failure(&error).red());
            return Ok(None);
        }
        ApiOutcome::NotFound => return Ok(None),
    };
    println!("{}", "✅ Customer created successfully!".green());
    print_customer(&customer)?;

    if !wait {
        return Ok(None);
    }
    println!("\n⏳ Waiting for customer to be ready...");
    let outcome = customers::wait_for_ready(client, &request.name, timeout).await?;
    Ok(Some(outcome))
}

/// Lists one page of customers.
pub async fn cmd_list(
    client: &CustomerApiClient,
    page: u32,
    page_size: u32,
) -> Result<(), ApiError> {
    let list = customers::list_customers(client, page, page_size).await?;
    println!("{}", format_customer_list(&list, page_size));
    Ok(())
}

/// Prints a single customer. Returns false if it doesn't exist.
pub async fn cmd_get(client: &CustomerApiClient, name: &str) -> Result<bool, ApiError> {
    match customers::get_customer(client, name).await?.found() {
        Some(customer) => {
            println!("📋 Customer: {}", name);
            print_customer(&customer)?;
            Ok(true)
        }
        None => {
            println!("{}", not_found_message(name));
            Ok(false)
        }
    }
}

/// Applies a partial update. Returns false if nothing was updated.
pub async fn cmd_update(
    client: &CustomerApiClient,
    name: &str,
    updates: &UpdateCustomerRequest,
) -> Result<bool, ApiError> {
    if updates.is_empty() {
        println!("{}", "❌ No updates specified".red());
        return Ok(false);
    }

    println!("🔄 Updating customer: {}", name);
    match customers::update_customer(client, name, updates).await?.found() {
        Some(customer) => {
            println!("{}", "✅ Customer updated successfully!".green());
            print_customer(&customer)?;
            Ok(true)
        }
        None => {
            println!("{}", not_found_message(name));
            Ok(false)
        }
    }
}

/// Deletes a customer after it has been confirmed. Returns false if nothing was deleted.
pub async fn cmd_delete(
    client: &CustomerApiClient,
    name: &str,
    confirmed: bool,
) -> Result<bool, ApiError> {
    if !confirmed {
        let stdin = io::stdin();
        let confirmed = confirm_deletion(name, &mut stdin.lock()).unwrap_or(false);
        if !confirmed {
            println!("❌ Deletion cancelled");
            return Ok(false);
        }
    }

    println!("🗑️ Deleting customer: {}", name);
    match customers::delete_customer(client, name).await?.found() {
        Some(_) => {
            println!("{}", "✅ Customer deleted successfully!".green());
            Ok(true)
        }
        None => {
            println!("{}", not_found_message(name));
            Ok(false)
        }
    }
}

/// Prints the status of a customer. Returns false if it doesn't exist.
pub async fn cmd_status(client: &CustomerApiClient, name: &str) -> Result<bool, ApiError> {
    match customers::get_customer_status(client, name).await?.found() {
        Some(status) => {
            println!("{}", format_status(name, &status));
            Ok(true)
        }
        None => {
            println!("{}", not_found_message(name));
            Ok(false)
        }
    }
}
