//! Compass command replay entry point
//!
//! Usage: `compass [--immediate] [--config <config.ron>] <script.ron>`
//!
//! Replays the script against a fresh session and prints the final scene
//! and one report per command as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use compass_editor::{Script, Session, create_shared_config, render_json, shared_config_at};

const USAGE: &str = "usage: compass [--immediate] [--config <config.ron>] <script.ron>";

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compass_editor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut immediate = false;
    let mut config_path = None;
    let mut path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--immediate" => immediate = true,
            "--config" => match args.next() {
                Some(p) => config_path = Some(PathBuf::from(p)),
                None => {
                    eprintln!("{USAGE}");
                    return ExitCode::from(2);
                }
            },
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let Some(path) = path else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let script = match Script::load(&path) {
        Ok(script) => script,
        Err(e) => {
            tracing::error!("Failed to load {:?}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let config = match config_path {
        Some(p) => shared_config_at(p),
        None => create_shared_config(),
    };
    if immediate {
        config.write().config_mut().animation.enabled = false;
    }
    let mut session = Session::from_shared(&config);

    tracing::info!("Replaying {} commands", script.len());
    let steps = script.run(&mut session);

    match render_json(session.scene(), &steps) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render result: {}", e);
            ExitCode::FAILURE
        }
    }
}
