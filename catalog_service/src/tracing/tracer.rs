use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use std::io;

use ::tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{MakeWriter, format::Format},
    prelude::*,
    registry::LookupSpan,
};

use crate::{
    config::{AppConfig, TracingConfig},
    error::AppResult,
};

/// Tracer configuration and initialization.
pub struct Tracer;

impl Tracer {
    /// Installs the global subscriber selected by the tracing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install(config: &AppConfig) -> AppResult<()> {
        if let TracingConfig::Stdout = config.tracing {
            Self::install_stdout_provider(config);
        }

        let layer = Self::fmt_layer(io::stderr).with_filter(EnvFilter::from_default_env());

        tracing_subscriber::registry().with(layer).try_init()?;

        Ok(())
    }

    /// Formatted event layer writing to `make_writer`.
    ///
    /// Standard output carries command results, so the process installs it over
    /// standard error.
    fn fmt_layer<S, W>(make_writer: W) -> impl Layer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        tracing_subscriber::fmt::layer()
            .event_format(Format::default().pretty())
            .with_writer(make_writer)
    }

    /// Installs the OpenTelemetry provider exporting spans to stdout.
    fn install_stdout_provider(config: &AppConfig) {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut resource = Resource::builder().with_service_name(config.distribution.name.clone());
        if let Some(version) = config.distribution.version.clone() {
            resource = resource.with_attribute(KeyValue::new("version", version));
        }

        let provider = SdkTracerProvider::builder()
            .with_resource(resource.build())
            .with_simple_exporter(SpanExporter::default())
            .build();
        global::set_tracer_provider(provider);
    }
}
