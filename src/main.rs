use candidate_console::cli::{commands, render, Cli};
use candidate_console::config::{get_config, init_config};
use candidate_console::confirm::{AutoConfirm, Confirm, StdinConfirm};
use candidate_console::storage::{FileTokenStore, TokenStore};
use candidate_console::App;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    init_config()?;
    let mut config = get_config()?.clone();
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.override_base_url(api_url)?;
    }

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };
    let app = App::new(config, tokens, confirm)?;

    match commands::run(&app, cli.command).await {
        Ok(output) => {
            if let Some(banner) = render::banner(&app.snapshot()) {
                println!("{}", banner);
            }
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            let message = app.snapshot().error.unwrap_or_else(|| e.user_message());
            eprintln!("Error: {}", message);
            tracing::debug!(error = ?e, "Command failed");
            std::process::exit(1);
        }
    }
}
