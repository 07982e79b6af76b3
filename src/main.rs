use chrono::Local;
use std::net::SocketAddr;
use study_tracker::{
    annotations::AnnotationIndex, notifier::Notifier, router, storage::KvStore,
    ticker::spawn_reminder_ticker, AppState, Config, Tracker,
};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let kv = KvStore::open(&config.data_path).await;
    let annotations = AnnotationIndex::load(&config.annotations_path).await;
    let mut notifier = Notifier::desktop();
    notifier.request_permission(config.notifications);

    let mut tracker = Tracker::new(kv, annotations, notifier);
    let missed = tracker.check_reminders(Local::now().time());
    if missed > 0 {
        info!(missed, "reminders due at startup");
    }

    let state = AppState::new(tracker);
    spawn_reminder_ticker(state.clone());

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
