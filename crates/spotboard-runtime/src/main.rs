//! spotboard: live spot table for state QSO party mobile tracking.
//! Polls the tracker's spot feed, colour-codes each spot by age, and keeps
//! the table display current.

use clap::Parser;

mod cli;
mod cmd_locate;
mod cmd_render;
mod cmd_write_feed;
mod poll_loop;
mod sink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr: stdout may be the display sink.
    let filter = std::env::var("SPOTBOARD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        cli::Command::Watch(opts) => {
            tracing::info!("spotboard watch starting");
            poll_loop::run_watch(opts).await?;
        }
        cli::Command::Render(opts) => {
            cmd_render::cmd_render(opts).await?;
        }
        cli::Command::County(opts) => {
            let count = spotboard_geo::convert_file(&opts.kml, &opts.output)?;
            println!("{count} counties written to {}", opts.output.display());
        }
        cli::Command::Locate(opts) => {
            cmd_locate::cmd_locate(&opts)?;
        }
        cli::Command::WriteFeed(opts) => {
            cmd_write_feed::cmd_write_feed(&opts)?;
        }
    }

    Ok(())
}
