use clap::Parser;
use tokio::net::TcpListener;
use todo_core::seed::{sample_todos, seed};
use todo_core::{DbPool, ToDoRepository};
use todo_server::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_logging(&config);

    let pool = DbPool::connect(&config.database_url, config.max_connections).await?;
    let repo = ToDoRepository::new(pool);

    if config.seed_sample {
        let stored = seed(&repo, sample_todos()).await?;
        info!(count = stored.len(), "seeded sample todos");
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    todo_server::run(listener, repo.clone()).await?;
    repo.pool().close().await;
    Ok(())
}

fn setup_logging(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(config.log_level().into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
