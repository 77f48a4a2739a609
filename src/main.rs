//! # Main Entry Point
//!
//! Initializes the application using the layered architecture:
//! - Domain: Configuration, Types and Errors
//! - Infrastructure: Matrix, HTTP, Aggregators, Pools
//! - Application: Router, Order Parsing, Formatting, Operator Log
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::application::logging::OperatorLog;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::JsonFetcher;
use crate::infrastructure::http::HttpFetcher;
use crate::infrastructure::matrix::MatrixService;

#[derive(Parser, Debug)]
#[command(version, about = "Matrix bot quoting DEX aggregator prices and pool returns")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let data_dir = Path::new(&config.system.data_dir);
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = data_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(data_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn,reqwest=warn")
    });

    // Layer for file (Always active)
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting DeFi quote bot...");

    // 3. Initialize Infrastructure
    let http: Arc<dyn JsonFetcher> = Arc::new(HttpFetcher::new(config.system.request_timeout)?);

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .initial_device_display_name("defi-quote-bot")
        .send()
        .await
        .context("Matrix login failed")?;

    tracing::info!("Logged in as {}", config.services.matrix.username);
    if config.services.matrix.operator_room.is_none() {
        tracing::warn!("No operator room configured; escalations and feedback are only logged");
    }

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();
    let loop_config = config.clone();
    let loop_http = http.clone();
    let loop_client = client.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let config = loop_config.clone();
        let http = loop_http.clone();
        let client = loop_client.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            if original_msg.sender == room.own_user_id() {
                return;
            }
            let body = &text_content.body;
            tracing::info!("Received message from {}: \n{}", original_msg.sender, body);

            // Operator room is resolved on demand; the bot may join it after startup
            let mut operators = OperatorLog::new();
            if let Some(ops) = config
                .services
                .matrix
                .operator_room
                .as_deref()
                .and_then(|id| MatrixService::for_room_id(&client, id))
            {
                operators = operators.with_chat(Arc::new(ops));
            }

            let chat = MatrixService::new(room);
            let router = CommandRouter::new(config, http, operators);

            // Dispatch
            if let Err(e) = router
                .route(&chat, body, original_msg.sender.as_str())
                .await
            {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("Joining room {} on invite", room.room_id());
            if let Err(e) = room.join().await {
                tracing::warn!("Failed to join {}: {}", room.room_id(), e);
            }
        }
    });

    // 6. Start Sync
    client
        .sync(SyncSettings::default())
        .await
        .context("Matrix sync stopped")?;

    Ok(())
}
