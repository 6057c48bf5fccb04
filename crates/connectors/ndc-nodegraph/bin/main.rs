use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ndc_nodegraph::connector::{DataSource, NodeGraph, NodeGraphSetup};
use ndc_nodegraph::server::{create_router, init_server_state};
use nodegraph_configuration::environment::ProcessEnvironment;
use nodegraph_configuration::{write_parsed_configuration, ParsedConfiguration};

#[derive(Parser)]
#[command(version, about = "Serve node graph frames from a graph API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long, value_name = "DIRECTORY", env = "NODEGRAPH_CONFIGURATION")]
        configuration: PathBuf,
        #[arg(long, value_name = "PORT", env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Write an initial configuration and its JSON schema.
    Initialize {
        #[arg(long, value_name = "DIRECTORY", env = "NODEGRAPH_CONFIGURATION")]
        configuration: PathBuf,
    },
    /// Run the connection test once and print the result.
    TestConnection {
        #[arg(long, value_name = "DIRECTORY", env = "NODEGRAPH_CONFIGURATION")]
        configuration: PathBuf,
    },
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Serve {
            configuration,
            port,
        } => {
            let state =
                init_server_state(NodeGraphSetup::new(ProcessEnvironment), configuration).await?;
            let router = create_router(state);

            let address = SocketAddr::from(([0, 0, 0, 0], port));
            tracing::info!(%address, "starting server");

            axum::Server::bind(&address)
                .serve(router.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            Ok(ExitCode::SUCCESS)
        }
        Command::Initialize { configuration } => {
            write_parsed_configuration(ParsedConfiguration::initial(), &configuration).await?;
            tracing::info!(directory = %configuration.display(), "configuration written");
            Ok(ExitCode::SUCCESS)
        }
        Command::TestConnection { configuration } => {
            let state =
                init_server_state(NodeGraphSetup::new(ProcessEnvironment), configuration).await?;
            let response = NodeGraph::test_datasource(state.configuration(), state.state()).await;

            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
