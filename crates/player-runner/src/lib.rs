//! Terminal player shell.
//!
//! Reads commands from stdin, drives the [`Shell`] and redraws the current
//! view after every command or room event.

pub mod commands;
pub mod render;
pub mod shell;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use tictac_player_adapters::infrastructure::DesktopStorageProvider;
use tictac_player_app::application::Api;
use tictac_player_ports::outbound::ConnectionFactoryPort;

pub use shell::{Flow, Shell};

pub struct RunnerDeps {
    pub api: Api,
    pub storage: DesktopStorageProvider,
    pub connections: Arc<dyn ConnectionFactoryPort>,
}

pub async fn run(deps: RunnerDeps) -> anyhow::Result<()> {
    let RunnerDeps {
        api,
        storage,
        connections,
    } = deps;

    let mut shell = Shell::new(api, storage, connections);
    shell.start().await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(&mut stdout, &shell).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                if shell.handle_command(commands::parse(&line)).await == Flow::Quit {
                    break;
                }
            }
            event = shell.next_room_event() => {
                shell.handle_transport_event(event);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
        draw(&mut stdout, &shell).await?;
    }

    shell.shutdown();
    Ok(())
}

async fn draw<S>(stdout: &mut tokio::io::Stdout, shell: &Shell<S>) -> anyhow::Result<()>
where
    S: tictac_player_ports::outbound::StorageProvider,
{
    let frame = format!("\n{}\n> ", shell.render());
    stdout.write_all(frame.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
