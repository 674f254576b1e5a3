use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rabbitmq::RabbitMQBuilder;
use tracing::{Level, info};

use bracket_engine::{
    BracketService, BracketServiceImpl, Config, EventConsumer, RabbitEventGateway,
    RabbitEventSource, bracket_info,
    domain::services::events::{BRACKET_GENERATED, MATCH_FINISHED, TOURNAMENT_CANCELLED},
    inbounds::dtos::StartBracketRequest,
};

#[derive(Debug, Parser)]
#[command(name = "bracket-engine", about = "Single-elimination bracket engine")]
struct Cli {
    /// Overrides LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Consume match results and publish advancements until Ctrl-C
    Serve {
        /// Overrides PREFETCH
        #[arg(long)]
        prefetch: Option<u16>,
    },
    /// Print the bracket shape for a participant count
    Plan { participants: usize },
    /// Start a tournament from a JSON file and publish its bracket
    Start {
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.unwrap_or(config.log_level))
        .init();

    match cli.command {
        Command::Serve { prefetch } => {
            if let Some(prefetch) = prefetch {
                config.prefetch = prefetch;
            }
            serve(config).await
        }
        Command::Plan { participants } => {
            let info = bracket_info(participants)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        Command::Start { file } => start(config, file).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting bracket engine worker");

    let topics = [MATCH_FINISHED, TOURNAMENT_CANCELLED, BRACKET_GENERATED]
        .map(str::to_owned)
        .to_vec();
    let mut rabbit = RabbitMQBuilder::new(&config.rabbit_url, &config.app_id, &config.exchange)
        .publisher()
        .subscriber(&config.queue, topics)
        .prefetch(config.prefetch)
        .build()
        .await?;

    let publisher = rabbit.take_publisher()?;
    let subscription = rabbit.take_subscription()?;

    let service: Arc<dyn BracketService> =
        Arc::new(BracketServiceImpl::new(RabbitEventGateway::new(publisher.get_dispatcher())));
    let consumer = EventConsumer::new(
        RabbitEventSource::new(subscription),
        service,
        config.requeue_on_publish_failure,
    );

    let source = consumer
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to listen for ctrl-c");
            }
        })
        .await;

    source.close().await?;
    publisher.close().await?;
    rabbit.connection().close().await?;
    info!("Bracket engine worker stopped");
    Ok(())
}

async fn start(config: Config, file: PathBuf) -> anyhow::Result<()> {
    let raw = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let request: StartBracketRequest =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", file.display()))?;

    let mut rabbit = RabbitMQBuilder::new(&config.rabbit_url, &config.app_id, &config.exchange)
        .publisher()
        .build()
        .await?;
    let publisher = rabbit.take_publisher()?;
    let service = BracketServiceImpl::new(RabbitEventGateway::new(publisher.get_dispatcher()));

    let result = service
        .start_bracket(
            &request.tournament,
            request.total_rounds_hint,
            request.participant_ids,
        )
        .await;

    publisher.close().await?;
    rabbit.connection().close().await?;

    let summary = result?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
