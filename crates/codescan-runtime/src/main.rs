//! codescan: read a 6-digit code from a video source by streaming consensus.

use clap::Parser;
use tokio::sync::watch;

use codescan_frame::{CommandFrameSource, DirFrameSource, FrameSource, TesseractRecognizer};

mod cli;
mod cmd_decide;
mod config;
mod scan_loop;
mod sink;

use config::{FileConfig, ScanConfig};
use scan_loop::{Outcome, RecognitionLoop};
use sink::{ClipboardSink, OutputFormat};

/// Exit code when the scan is interrupted.
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = std::env::var("CODESCAN_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let file = FileConfig::load_optional(args.config.as_deref())?;

    let exit_code = match args.command {
        cli::Command::Scan(opts) => {
            let config = ScanConfig::resolve(&file, &opts)?;
            cmd_scan(config).await?
        }
        cli::Command::Decide(opts) => {
            let policy = config::resolve_policy(&file, &opts.policy)?;
            cmd_decide::cmd_decide(policy, opts.json)?
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn open_source(config: &ScanConfig) -> anyhow::Result<Box<dyn FrameSource>> {
    Ok(match (&config.source_dir, &config.source_cmd) {
        (Some(dir), _) => Box::new(DirFrameSource::open(dir)?.repeat(config.repeat)),
        (None, Some(line)) => Box::new(
            CommandFrameSource::from_command_line(line)
                .ok_or_else(|| anyhow::anyhow!("--source-cmd is empty"))?,
        ),
        (None, None) => anyhow::bail!("no video source: pass --source-cmd or --source-dir"),
    })
}

async fn cmd_scan(config: ScanConfig) -> anyhow::Result<i32> {
    let source = open_source(&config)?;

    let mut recognizer = TesseractRecognizer::new(&config.tesseract_bin).with_lang(&config.lang);
    if let Some(psm) = config.psm {
        recognizer = recognizer.with_psm(psm);
    }

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut sink = ClipboardSink::new(std::io::stdout(), config.clipboard, format);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown().await;
        let _ = stop_tx.send(true);
    });

    let mut scan = RecognitionLoop::new(source, recognizer, config.loop_config.clone());
    let code = loop {
        match scan.run(stop_rx.clone(), &mut sink).await? {
            Outcome::Accepted(_) if config.continuous => scan.replace_source(open_source(&config)?),
            Outcome::Accepted(_) => break 0,
            Outcome::Cancelled(_) => break EXIT_CANCELLED,
            Outcome::Exhausted(summary) => {
                eprintln!(
                    "no consensus after {} frames ({} unreadable)",
                    summary.frames, summary.empty_frames
                );
                break 1;
            }
        }
    };
    tracing::debug!(state = ?scan.state(), "scan finished");
    Ok(code)
}

/// Resolve on ctrl-c or SIGTERM.
async fn wait_for_shutdown() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("received ctrl-c, stopping scan"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, stopping scan"),
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {e}");
                ctrl_c.await.ok();
                tracing::info!("received ctrl-c, stopping scan");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        tracing::info!("received ctrl-c, stopping scan");
    }
}
