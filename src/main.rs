//! content-dumper - Operator CLI.
//!
//! Runs the batch lifecycle routines against the PostgreSQL store and
//! applies schema migrations.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use content_dumper::{
    adapters::{
        cache::{InMemoryTagCache, RedisTagCache},
        events::{register_default_handlers, EventDispatcher},
        notification::{LogOnlyNotifier, WebhookNotifier},
        postgres::PostgresContentStore,
    },
    application::{BatchError, BatchLifecycleHandler},
    config::AppConfig,
    domain::{
        content::{ArticlePayload, BookPayload, ContentDomain, ImagePayload, NotePayload},
        foundation::UserId,
        system::SystemEvent,
    },
    ports::{EventPublisher, Notifier, StatusStore, TagCache},
    telemetry,
};

/// Export lifecycle operations for content-dumper.
#[derive(Parser)]
#[command(name = "content-dumper", about = "Export lifecycle operations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch routine for one owner and domain.
    Batch {
        #[arg(value_enum)]
        routine: Routine,

        /// Content domain: articles, notes, images, books.
        #[arg(long)]
        domain: ContentDomain,

        /// Owner whose items are moved.
        #[arg(long, env = "CONTENT_DUMPER_OWNER")]
        owner: String,
    },

    /// Apply pending database migrations.
    Migrate,
}

#[derive(Clone, Copy, ValueEnum)]
enum Routine {
    /// Finalize the previous batch, then mark unexported items.
    Reset,
    /// Return the in-flight batch to unexported.
    Revert,
}

impl Routine {
    fn as_str(&self) -> &'static str {
        match self {
            Routine::Reset => "reset",
            Routine::Revert => "revert",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    telemetry::init(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let pool = config
        .database
        .connect()
        .await
        .context("failed to connect to PostgreSQL")?;

    let migrate = matches!(cli.command, Commands::Migrate);
    if migrate || config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("migrations applied");
        if migrate {
            println!("migrations applied");
            return Ok(());
        }
    }

    if let Commands::Batch {
        routine,
        domain,
        owner,
    } = cli.command
    {
        let owner = UserId::new(owner).context("invalid owner id")?;
        let cache = build_cache(&config).await?;
        let dispatcher = Arc::new(EventDispatcher::new());
        register_default_handlers(&dispatcher, build_notifier(&config)?);

        let store = status_store(domain, pool);
        let handler = BatchLifecycleHandler::new(store, cache);

        if let Err(err) = run_batch(&handler, routine, &owner).await {
            report_failure(dispatcher.as_ref(), routine, domain, &owner, &err).await;
            return Err(err).context(format!("batch {} failed, nothing was applied", routine.as_str()));
        }
    }

    Ok(())
}

async fn run_batch(
    handler: &BatchLifecycleHandler,
    routine: Routine,
    owner: &UserId,
) -> Result<(), BatchError> {
    match routine {
        Routine::Reset => {
            let report = handler.reset(owner).await?;
            println!(
                "{} reset for {}: finalized={} marked={}",
                handler.domain(),
                owner,
                report.finalized,
                report.marked
            );
        }
        Routine::Revert => {
            let report = handler.revert(owner).await?;
            println!(
                "{} revert for {}: reverted={}",
                handler.domain(),
                owner,
                report.reverted
            );
        }
    }
    Ok(())
}

async fn report_failure(
    publisher: &dyn EventPublisher,
    routine: Routine,
    domain: ContentDomain,
    owner: &UserId,
    err: &BatchError,
) {
    let event = SystemEvent::error(format!("batch {} failed", routine.as_str()))
        .notify()
        .with_extra_data(json!({
            "domain": domain.as_str(),
            "error": err.to_string(),
        }));
    let envelope = match event.to_envelope() {
        Ok(envelope) => envelope
            .with_caller(format!("batch.{}", routine.as_str()))
            .with_user_id(owner.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build batch failure event");
            return;
        }
    };
    if let Err(e) = publisher.dispatch(envelope).await {
        tracing::warn!(error = %e, "failed to report batch failure");
    }
}

fn status_store(domain: ContentDomain, pool: sqlx::PgPool) -> Arc<dyn StatusStore> {
    match domain {
        ContentDomain::Articles => Arc::new(PostgresContentStore::<ArticlePayload>::new(pool)),
        ContentDomain::Notes => Arc::new(PostgresContentStore::<NotePayload>::new(pool)),
        ContentDomain::Images => Arc::new(PostgresContentStore::<ImagePayload>::new(pool)),
        ContentDomain::Books => Arc::new(PostgresContentStore::<BookPayload>::new(pool)),
    }
}

async fn build_cache(config: &AppConfig) -> Result<Arc<dyn TagCache>> {
    match &config.redis {
        Some(redis) => {
            let cache = tokio::time::timeout(redis.timeout(), RedisTagCache::connect(&redis.url))
                .await
                .context("timed out connecting to Redis")?
                .context("failed to connect to Redis")?
                .with_prefix(redis.key_prefix.clone());
            Ok(Arc::new(cache))
        }
        None => Ok(Arc::new(InMemoryTagCache::new())),
    }
}

fn build_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>> {
    match config.notification.webhook() {
        Some(webhook) => Ok(Arc::new(
            WebhookNotifier::new(webhook).context("failed to build webhook notifier")?,
        )),
        None => Ok(Arc::new(LogOnlyNotifier::new())),
    }
}
