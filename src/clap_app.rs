use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::debug;
use std::process;
use std::time::Duration;

use crate::clap_models::*;
use crate::client::CustomerApiClient;
use crate::commands::{
    build_create_request, build_update_request, cmd_create, cmd_delete, cmd_get, cmd_list,
    cmd_status, cmd_update,
};
use crate::config::ApiConfig;
use crate::customers::health_check;
use crate::errors::{report_api_error, ApiError};

pub async fn init_cli() {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => {
            let _ = Cli::command().print_help();
            process::exit(1);
        }
    };

    let api_key = match cli.api_key.as_deref() {
        Some(key) if !key.is_empty() => key,
        _ => {
            eprintln!(
                "{}",
                "❌ API key is required. Set API_KEY environment variable or use --api-key".red()
            );
            process::exit(1);
        }
    };

    let client = CustomerApiClient::from(ApiConfig::new(&cli.api_url, api_key));

    if let Err(err) = run(&client, &command).await {
        report_api_error(&err, &client.config.api_url);
        process::exit(1);
    }
}

/// Checks that the API is reachable and executes the given command.
pub async fn run(client: &CustomerApiClient, command: &Commands) -> Result<(), ApiError> {
    let health = health_check(client).await?;
    debug!("API server is {} (version {})", health.status, health.version);

    match command {
        Commands::Create {
            name,
            display_name,
            image_tag,
            environment,
            team,
            labels,
            wait,
            timeout,
        } => {
            let request = build_create_request(
                name,
                display_name.as_deref(),
                image_tag,
                *environment,
                team.as_deref(),
                labels,
            );
            cmd_create(client, &request, *wait, Duration::from_secs(*timeout)).await?;
        }

        Commands::List { page, page_size } => {
            cmd_list(client, *page, *page_size).await?;
        }

        Commands::Get { name } => {
            cmd_get(client, name).await?;
        }

        Commands::Update {
            name,
            display_name,
            image_tag,
            environment,
            labels,
        } => {
            let updates = build_update_request(
                display_name.as_deref(),
                image_tag.as_deref(),
                *environment,
                labels,
            );
            cmd_update(client, name, &updates).await?;
        }

        Commands::Delete { name, confirm } => {
            cmd_delete(client, name, *confirm).await?;
        }

        Commands::Status { name } => {
            cmd_status(client, name).await?;
        }
    }
    Ok(())
}
