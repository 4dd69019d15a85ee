// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RuneSync dashboard renderer
//!
//! Renders the dashboard once and writes it to the configured output path.

use runesync::{
    config::{Config, LogFormat},
    dashboard, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env()?;
    init_logging(config.log_format);

    tracing::info!(output = %config.output_path.display(), "Rendering RuneSync dashboard");

    let state = AppState::initialize(config)
        .inspect_err(|e| tracing::error!(error = %e, "Startup failed"))?;

    let image = dashboard::render(&state)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Dashboard render failed"))?;

    dashboard::save(&image, &state.config.output_path)?;
    tracing::info!(
        path = %state.config.output_path.display(),
        width = image.width(),
        height = image.height(),
        "Dashboard rendered successfully"
    );
    Ok(())
}

/// Initialize logging: human-readable by default, flattened JSON on request.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("runesync=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}
