use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_console::{
    api::HttpEnvironmentApi,
    dashboard,
    log::log_environment_list,
    models::config::{ApiConfig, ConsoleConfig, debug_print_config},
    render::RenderedList,
    synchronizer::{EnvironmentSynchronizer, follow_changes, spawn_polling},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the environments API (default: from config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the environment list once
    List,
    /// Request a new environment, then print the list
    Create,
    /// Take down an environment, then print the list
    Remove {
        /// Environment id as shown by `list`
        id: String,
    },
    /// Poll the API and log the list whenever it changes
    Watch,
    /// Poll the API and serve the dashboard page
    Serve {
        /// Address to bind (default: from config)
        #[arg(long)]
        bind: Option<String>,
    },
}

fn print_list(list: &RenderedList) {
    for entry in list.entries() {
        println!("{}\t{}", entry.label, entry.href);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut cfg = ConsoleConfig::load()?;
    if let Some(url) = args.api_url {
        cfg = cfg.with_api(ApiConfig::new(url));
    }
    debug_print_config(&cfg);

    let api = HttpEnvironmentApi::new(cfg.api_config()?).context("building API client")?;
    let sync = Arc::new(EnvironmentSynchronizer::new(api));

    match args.command {
        Command::List => {
            sync.refresh().await.context("fetching environments")?;
            print_list(&sync.snapshot());
        }
        Command::Create => {
            let outcome = sync.create().await;
            print_list(&sync.snapshot());
            outcome.into_result().context("creating environment")?;
        }
        Command::Remove { id } => {
            let outcome = sync.remove(&id).await;
            print_list(&sync.snapshot());
            outcome
                .into_result()
                .with_context(|| format!("taking down environment {id}"))?;
        }
        Command::Watch => {
            follow_changes(
                sync,
                cfg.sync.poll_interval,
                log_environment_list,
                async {
                    let _ = tokio::signal::ctrl_c().await;
                },
            )
            .await;
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| cfg.dashboard.bind_address());
            let _poller = spawn_polling(sync.clone(), cfg.sync.poll_interval);

            info!("Starting environment dashboard on {}", bind);
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding dashboard to {bind}"))?;
            axum::serve(listener, dashboard::router(sync)).await?;
        }
    }

    Ok(())
}
