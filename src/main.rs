//! CLI for carlocation
//!
//! Subcommands:
//! - `publisher`: publish the car's location every couple of seconds
//! - `subscriber`: log every car location published to the broker

use std::process::ExitCode;

use carlocation::client::{BrokerSession, LoopTiming, MessageHandler, RunOutcome};
use carlocation::config::{Settings, load_config};
use carlocation::shutdown::{Shutdown, listen_for_signals};
use carlocation::utils::logging;
use carlocation::{publisher, subscriber};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Clone, Copy)]
#[command(name = "carlocation", about = "Car location publisher and subscriber over MQTT")]
enum Command {
    /// Publish the car's location to the broker until interrupted
    Publisher,
    /// Subscribe to car locations and log them until interrupted
    Subscriber,
}

impl Command {
    fn role(&self) -> &'static str {
        match self {
            Command::Publisher => "publisher",
            Command::Subscriber => "subscriber",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cmd = Command::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.log.level);

    let shutdown = Shutdown::new();
    tokio::spawn(listen_for_signals(shutdown.clone(), cmd.role()));

    let result = run_role(cmd, &settings, &shutdown).await;

    match result {
        Ok(outcome) => {
            info!("Exiting ({:?})", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_role(
    cmd: Command,
    settings: &Settings,
    shutdown: &Shutdown,
) -> Result<RunOutcome, Box<dyn std::error::Error>> {
    let (name, on_message): (&str, Option<MessageHandler>) = match cmd {
        Command::Publisher => (publisher::CLIENT_NAME, None),
        Command::Subscriber => (subscriber::CLIENT_NAME, Some(subscriber::handler())),
    };

    let session = BrokerSession::connect(name, settings, on_message).await?;
    info!("Session established as {}", session.client_id());

    let timing = LoopTiming::from(&settings.client);
    let outcome = match cmd {
        Command::Publisher => publisher::run(session, shutdown, timing).await,
        Command::Subscriber => subscriber::run(session, shutdown, timing).await,
    };
    Ok(outcome)
}
