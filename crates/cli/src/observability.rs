//! Tracing subscriber and optional OpenTelemetry export.
//!
//! Logs go to stderr so stdout carries only the report or the issue URL.
//!
//! Environment variables:
//!   RUST_LOG                      log filter (default: info, or debug with --debug)
//!   OTEL_EXPORTER_OTLP_ENDPOINT   OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME             service name (default: weekly-report)

use anyhow::{anyhow, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LogFormat;

const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "weekly-report";

/// Tracing options taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub format: LogFormat,
    pub debug: bool,
    pub otel: bool,
}

/// Installs the global subscriber.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(config.debug)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (otel_layer, endpoint) = if config.otel {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_OTLP_ENDPOINT.to_string());
        let tracer = install_tracer_provider(&endpoint)?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(endpoint),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    if let Some(endpoint) = endpoint {
        tracing::info!(endpoint = %endpoint, "OpenTelemetry export enabled");
    }
    Ok(())
}

fn install_tracer_provider(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| anyhow!("failed to create OTLP exporter: {e}"))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
            "service.name",
            service_name,
        )]))
        .build();

    let tracer = provider.tracer(DEFAULT_SERVICE_NAME);
    // The global handle keeps the provider alive until shutdown.
    let _ = opentelemetry::global::set_tracer_provider(provider);
    Ok(tracer)
}

/// Flushes pending spans. No-op when export was never enabled.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}
