//! # Formline Main Entry Point
//!
//! Profile-based client for form data servers: load the form list, then
//! optionally download or export data for a chosen form.

use anyhow::Result;
use formline::cmd_args::CommandLineArgs;
use formline::{
    blank_profile, config, AppController, ConnectionProfile, FormListView, HttpApiService,
    HttpSubmitSink, IniProfileStore, TerminalNotifier,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = CommandLineArgs::parse();

    // Load profile from configuration
    let profile_path = config::get_profile_path();
    let store = IniProfileStore::new(&profile_path);
    let profile = match store.get_profile(args.profile())? {
        Some(profile) => profile,
        None => {
            tracing::debug!(
                "Profile '{}' not found in '{profile_path}', using blank profile",
                args.profile()
            );
            blank_profile()
        }
    };

    if args.verbose() {
        println!("[{}] in {profile_path}", args.profile());
    }

    let download_dir = resolve_download_dir(&args, &profile)?;

    let api = HttpApiService::new(&profile)?;
    let sink = HttpSubmitSink::new(&profile, download_dir.clone())?;
    let mut app =
        AppController::with_profile(&profile, api, TerminalNotifier, sink, download_dir);

    app.load_forms().await?;

    let stdout = std::io::stdout();
    FormListView::render(app.forms(), &mut stdout.lock())?;

    if let Some(pk) = args.download() {
        let completed = app.download_data(pk).await?;
        println!(
            "Saved {} ({} bytes)",
            completed.path.display(),
            completed.bytes
        );
    }

    if let Some(pk) = args.export() {
        if let Some(path) = app.export_data(pk).await? {
            println!("Export written to {}", path.display());
        }
    }

    Ok(())
}

/// Download directory: CLI flag, then profile, then the working directory
fn resolve_download_dir(args: &CommandLineArgs, profile: &impl ConnectionProfile) -> Result<PathBuf> {
    if let Some(dir) = args.output() {
        return Ok(dir.clone());
    }
    if let Some(dir) = profile.download_dir() {
        return Ok(PathBuf::from(shellexpand::tilde(dir).as_ref()));
    }
    Ok(std::env::current_dir()?)
}

/// Initialize tracing with a configurable log level
fn init_tracing() {
    let log_level = std::env::var(config::LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
