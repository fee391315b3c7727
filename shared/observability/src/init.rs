//! Tracing initialization.

use std::env;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name: String,
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Emit span open/close events.
    pub log_spans: bool,
    pub include_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "companies-toolbox".to_string(),
            format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(LogFormat::Pretty),
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_spans: env::var("LOG_SPANS").map(|v| v == "true").unwrap_or(false),
            include_location: env::var("LOG_LOCATION").map(|v| v == "true").unwrap_or(false),
        }
    }
}

impl TracingConfig {
    pub fn for_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    pub fn with_spans(mut self) -> Self {
        self.log_spans = true;
        self
    }
}

/// Install the global subscriber. Calling this twice is a no-op.
pub fn init_tracing(config: TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.log_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_current_span(true)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_span_events(span_events)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            service = %config.service_name,
            format = ?config.format,
            "Tracing initialized"
        );
    }
}

pub fn init_tracing_for(service_name: &str) {
    init_tracing(TracingConfig::for_service(service_name));
}
