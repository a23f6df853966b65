// Copyright (c) 2024 Nexus. All rights reserved.

mod alerts;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod events;
mod format;
mod logging;
mod network;
mod push;
mod session;
mod snapshot;
mod summary;
mod ui;

use crate::config::{Config, Overrides, Settings, get_config_path};
use crate::logging::{LogSink, init_logger};
use crate::network::{HttpSnapshotClient, SnapshotFetcher};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::summary::render_report;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the live market dashboard
    Start {
        /// Print updates to the console instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Root URL of the dashboard server
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,

        /// Push channel URL. Derived from the server URL when omitted.
        #[arg(long, value_name = "URL")]
        ws_url: Option<String>,

        /// Number formatting locale, e.g. pt-BR or en-US
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,

        /// Append diagnostic logs to this file while the dashboard is drawn
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,

        /// Disable background colors
        #[arg(long = "no-background", action = clap::ArgAction::SetTrue)]
        no_background: bool,
    },
    /// Fetch one snapshot and print it
    Snapshot {
        /// Root URL of the dashboard server
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,

        /// Number formatting locale, e.g. pt-BR or en-US
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,

        /// Print the raw response as JSON
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,

        /// Save the raw response as JSON to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Save default settings to the configuration file
    Configure {
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,

        #[arg(long, value_name = "URL")]
        ws_url: Option<String>,

        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,

        /// Exchange shown in the market status banner
        #[arg(long, value_name = "CODE")]
        exchange: Option<String>,

        /// Seconds to wait for the push channel to answer a manual refresh
        #[arg(long, value_name = "SECONDS")]
        ack_timeout: Option<u64>,
    },
    /// Delete the configuration file
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Start {
            headless,
            server_url,
            ws_url,
            locale,
            log_file,
            no_background,
        } => {
            let sink = match (headless, log_file.as_deref()) {
                (true, _) => LogSink::Stderr,
                (false, Some(path)) => LogSink::File(path),
                (false, None) => LogSink::Disabled,
            };
            init_logger(sink)?;

            let config = Config::load_or_default(&config_path);
            let overrides = Overrides {
                server_url,
                ws_url,
                locale,
            };
            let session = setup_session(Settings::resolve(&overrides, &config))?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, !no_background).await
            }
        }
        Command::Snapshot {
            server_url,
            locale,
            json,
            output,
        } => {
            init_logger(LogSink::Stderr)?;
            let config = Config::load_or_default(&config_path);
            let overrides = Overrides {
                server_url,
                ws_url: None,
                locale,
            };
            let settings = Settings::resolve(&overrides, &config);
            let client = HttpSnapshotClient::new(settings.server_url.clone())?;
            match fetch_once(&client, &settings, json, output).await? {
                SnapshotOutput::Saved(path) => {
                    crate::print_cmd_success!("Snapshot saved", "{}", path.display());
                }
                SnapshotOutput::Text(text) => println!("{}", text),
            }
            Ok(())
        }
        Command::Configure {
            server_url,
            ws_url,
            locale,
            exchange,
            ack_timeout,
        } => {
            let mut config = Config::load_or_default(&config_path);
            config.merge(Config {
                server_url,
                ws_url,
                locale,
                primary_exchange: exchange,
                refresh_ack_timeout_secs: ack_timeout,
            });
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!(
                "Configuration saved",
                "{}",
                config_path.display()
            );
            Ok(())
        }
        Command::ResetConfig => {
            crate::print_cmd_info!("Clearing configuration", "{}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// What the `snapshot` command produced.
#[derive(Debug, PartialEq)]
enum SnapshotOutput {
    /// The raw response was written to this file.
    Saved(PathBuf),
    /// Text for stdout: a report or JSON.
    Text(String),
}

/// Fetch one snapshot and turn it into a report, JSON, or a saved file.
async fn fetch_once(
    fetcher: &dyn SnapshotFetcher,
    settings: &Settings,
    json: bool,
    output: Option<PathBuf>,
) -> Result<SnapshotOutput, Box<dyn Error>> {
    let response = match fetcher.fetch_snapshot().await {
        Ok(response) => response,
        Err(e) => {
            crate::print_cmd_error!("Server connection error", e.to_string().as_str());
            return Err(e.into());
        }
    };

    if let Some(path) = output {
        let body = serde_json::to_string_pretty(&response)?;
        std::fs::write(&path, body)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        return Ok(SnapshotOutput::Saved(path));
    }

    if json {
        return Ok(SnapshotOutput::Text(serde_json::to_string_pretty(&response)?));
    }

    match (response.success, response.data) {
        (true, Some(data)) => Ok(SnapshotOutput::Text(render_report(
            &data,
            &settings.primary_exchange,
            Default::default(),
            settings.locale,
        ))),
        (true, None) => Err("Snapshot response carried no data".into()),
        (false, _) => {
            let reason = response.error.unwrap_or_else(|| "unknown error".to_string());
            Err(format!("Failed to load data: {}", reason).into())
        }
    }
}
