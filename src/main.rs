//! `agectl` is a CLI to manage customer instances of the PostgreSQL AGE operator API. It mainly
//! uses `clap` and `reqwest` under the hood.
//!
//! The main logic for the application can be found in `clap_app.rs`, the API calls live in
//! `customers.rs`.

mod clap_app;
mod clap_models;
mod client;
mod commands;
mod config;
mod customers;
mod environments;
mod errors;
mod models;

use crate::clap_app::init_cli;

#[tokio::main]
async fn main() {
    // enable logger
    env_logger::init();

    // Enable virtual terminal to correctly colorize output on Windows 10 machines
    #[cfg(target_os = "windows")]
    let _ = colored::control::set_virtual_terminal(true);

    init_cli().await;
}
