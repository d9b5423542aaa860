use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use api::{AppState, router};
use clap::Parser;
use config::Settings;
use dotenvy::dotenv;
use extract::{LineCatalogExtractor, ScheduleExtractor};
use fetch::ReqwestFetcher;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod api;
mod config;
mod error;
mod extract;
mod fetch;
mod model;
mod utils;

const SERVICE_NAME: &str = "ctpcj_timetables";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    _ = dotenv();
    let settings = Settings::parse();

    let provider = settings
        .otlp_endpoint
        .as_deref()
        .map(tracer_provider)
        .transpose()?;

    let telemetry_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
    });

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily(&settings.log_dir, "ctpcj_timetables.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    let stdout_log = tracing_subscriber::fmt::layer().compact();

    Registry::default()
        .with(telemetry_layer)
        .with(file_log)
        .with(stdout_log)
        .with(env_filter)
        .init();

    info!("OTLP_ENDPOINT: {:?}", settings.otlp_endpoint);

    let fetcher = Arc::new(
        ReqwestFetcher::new(settings.http_timeout()).context("couldn't build the http client")?,
    );

    let state = AppState {
        catalog: LineCatalogExtractor::new(fetcher.clone(), settings.base_url.clone()),
        schedules: ScheduleExtractor::new(fetcher, settings.schedule_base_url.clone()),
    };

    let address = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("couldn't listen on {address}"))?;

    info!("Starting web server on port {}", settings.port);

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(provider) = provider
        && let Err(e) = provider.shutdown()
    {
        error!("error shutting down the tracer provider {e}");
    }

    served.context("web server stopped unexpectedly")
}

fn tracer_provider(endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_timeout(Duration::from_millis(1000))
        .with_endpoint(endpoint)
        .with_protocol(Protocol::Grpc)
        .build()
        .context("couldn't build the span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("error listening for ctrl-c {e}");
    }

    info!("Shutting down");
}
