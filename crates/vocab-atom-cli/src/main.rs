#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::config::{CliArgs, CliConfig};
use cli::input::{Input, parse_line};
use cli::output::{render_event, render_phase};
use cli::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::{LinesStream, ReceiverStream};
use vocab_atom::{Event, FetchHandle, FetchOrchestrator, ThreadRandom};

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry(config.log_format)?;

    let store = config.source.load()?;
    log_startup_info(&config, store.len());

    let (handle, events) =
        FetchOrchestrator::spawn(Arc::new(store), config.fetch.clone(), ThreadRandom)?;
    let printer = tokio::spawn(print_events(events));

    let outcome = tokio::select! {
        res = read_commands(&handle) => res,
        res = shutdown_signal() => res,
    };

    tracing::info!("Shutting down the orchestrator");
    if let Err(e) = handle.shutdown().await {
        tracing::error!("Error during orchestrator shutdown: {e}");
    }

    // The event channel closes once the supervisor and session tasks exit.
    printer.await?;
    tracing::info!("Shut down successfully");
    outcome
}

fn log_startup_info(config: &CliConfig, records: usize) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Loaded {} records, full config: {:#?}",
            records,
            config
        );
    } else {
        tracing::info!(
            "Loaded {} records, fetch limit {}",
            records,
            config.fetch.fetch_limit
        );
    }
}

/// Reads the line protocol from stdin until EOF or `quit`.
async fn read_commands(handle: &FetchHandle) -> anyhow::Result<()> {
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    while let Some(line) = lines.next().await {
        match parse_line(&line?) {
            Ok(None) => {}
            Ok(Some(Input::Quit)) => break,
            Ok(Some(Input::Phase)) => println!("{}", render_phase(handle.phase())),
            Ok(Some(Input::Command(command))) => {
                tracing::debug!("Sending {} command", command.name());
                handle.send(command).await?;
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    Ok(())
}

async fn print_events(events: mpsc::Receiver<Event>) {
    let mut events = ReceiverStream::new(events);
    while let Some(event) = events.next().await {
        println!("{}", render_event(&event));
    }
}

async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())?
            .recv()
            .await;
        anyhow::Ok(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<anyhow::Result<()>>();

    tokio::select! {
        res = signal::ctrl_c() => {
            res?;
            tracing::info!("Received Ctrl+C signal");
        },
        res = terminate => {
            res?;
            tracing::info!("Received SIGTERM signal");
        },
    }

    Ok(())
}
