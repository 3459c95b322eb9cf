use std::{future::IntoFuture, process, sync::Arc, time::Duration};

use millwright::{
    application::{error::AppError, repos::ContentRepo},
    config,
    domain::types::ContentType,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        invalidators::build_invalidator,
        telemetry,
    },
    revalidation::{RevalidationConfig, RevalidationTrigger},
};
use serde_json::json;
use tokio::sync::watch;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Revalidate(args) => run_revalidate(settings, args).await,
    }
}

fn build_trigger(settings: &config::Settings) -> Result<Arc<RevalidationTrigger>, AppError> {
    let config = RevalidationConfig::from(&settings.revalidation);
    let invalidator = build_invalidator(&config).map_err(AppError::from)?;
    Ok(Arc::new(RevalidationTrigger::new(invalidator)))
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let trigger = build_trigger(&settings)?;

    if settings.admin.token.is_none() {
        warn!(
            target = "millwright::serve",
            "No admin token configured; the content API is unauthenticated"
        );
    }

    let store: Arc<dyn ContentRepo> = repositories;
    let state = ApiState::new(store, trigger, settings.admin.token.clone());

    serve_http(&settings, state).await
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "millwright::serve",
        addr = %settings.server.addr,
        "Listening"
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    let mut server_stop = stop_rx.clone();
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            let _ = server_stop.changed().await;
        },
    );
    let server = server.into_future();

    let grace = settings.server.graceful_shutdown;
    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = drain_deadline(stop_rx, grace) => {
            warn!(
                target = "millwright::serve",
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "millwright::serve", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "millwright::serve", "Shutdown signal received");
}

/// Resolves once shutdown was requested and `grace` has elapsed since.
async fn drain_deadline(mut stop: watch::Receiver<bool>, grace: Duration) {
    if stop.changed().await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

async fn run_revalidate(
    settings: config::Settings,
    args: config::RevalidateArgs,
) -> Result<(), AppError> {
    let content_type: ContentType = args.content_type.parse().map_err(AppError::from)?;
    let page = args
        .page
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty());
    let trigger = build_trigger(&settings)?;

    let result = trigger.revalidate(content_type, page.as_deref()).await;

    let output = json!({
        "contentType": content_type,
        "page": page,
        "revalidation": &result,
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|err| AppError::unexpected(format!("failed to render result: {err}")))?;
    println!("{rendered}");

    if result.has_errors() {
        return Err(AppError::unexpected(format!(
            "{} invalidation(s) failed",
            result.errors.len()
        )));
    }

    Ok(())
}
