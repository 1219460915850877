use std::io;
use std::time::Instant;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry, filter, fmt};

use crate::cli;

struct SpanTimingLayer;

impl<S> Layer<S> for SpanTimingLayer
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_enter(&self, id: &tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if let Some(span) = ctx.span(id)
            && span.extensions().get::<Instant>().is_none()
        {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if let Some(span) = ctx.span(&id)
            && let Some(start) = span.extensions().get::<Instant>()
            && ctx.enabled(span.metadata())
        {
            let duration = start.elapsed();
            let name = span.name();
            tracing::info!(target: "meta", span = name, span.duration = ?duration);
        }
    }
}

/// Installs a stderr subscriber; stdout is reserved for command output.
pub fn start(config: &cli::Config) -> anyhow::Result<()> {
    let fmt_filter = filter::Targets::new()
        .with_target("checking", config.check_log)
        .with_target("analyzer", config.analyzer_log)
        .with_target("compiler_bin", config.analyzer_log)
        .with_target("meta", LevelFilter::INFO)
        .with_default(LevelFilter::WARN);
    let fmt = fmt::layer().with_writer(io::stderr).with_filter(fmt_filter);

    let timing_filter = filter::Targets::new()
        .with_target("checking", config.check_log)
        .with_target("analyzer", config.analyzer_log)
        .with_default(LevelFilter::OFF);
    let timing = SpanTimingLayer.with_filter(timing_filter);

    let subscriber = Registry::default().with(fmt).with(timing);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
