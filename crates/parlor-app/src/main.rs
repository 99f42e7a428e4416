mod cli;
mod commands;
mod console;
mod repl;
mod startup;

use std::process::ExitCode;

use chrono::Local;
use parlor_ai::Presenter;
use parlor_common::EntryRole;
use tokio::io::BufReader;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use console::ConsolePresenter;

/// Load environment variables from a `.env` file (KEY=VALUE lines) in the
/// current directory. Variables already set are left alone.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_logging(level: Option<&str>) {
    let directive = level
        .unwrap_or("parlor=info")
        .parse::<Directive>()
        .or_else(|_| "parlor=info".parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Load .env before config so its credentials act as env overrides
    load_dotenv();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("Parlor v{} starting...", env!("CARGO_PKG_VERSION"));

    let (config, config_notice) = startup::load_config(&args);
    tracing::info!("Config loaded (deployment: {})", config.api.deployment);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut presenter = ConsolePresenter::stdout();
    for notice in [config_notice, startup::placeholder_notice(&config)]
        .into_iter()
        .flatten()
    {
        presenter.on_message_appended(EntryRole::Error, &notice, Local::now());
    }
    println!("Parlor {}. Type /help for commands.", env!("CARGO_PKG_VERSION"));

    let (mut controller, outcomes) = match startup::build_session(
        &args,
        &config,
        Box::new(presenter),
        runtime.handle().clone(),
    ) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            eprintln!("parlor: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.resume {
        if let Err(e) = repl::resume(&mut controller) {
            tracing::warn!("Resume failed: {e}");
        }
    }

    let input = BufReader::new(tokio::io::stdin());
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    let result = runtime.block_on(repl::run(controller, outcomes, input, interrupt));
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));

    match result {
        Ok(_) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Session ended with error: {e}");
            ExitCode::FAILURE
        }
    }
}
