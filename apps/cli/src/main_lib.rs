use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use fundboard_connect::{
    DashboardApiClient, DashboardOrchestrator, LoadCycleReport, LoaderConfig,
};
use fundboard_render::HtmlDashboard;

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("FB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_loader(config: &Config) -> anyhow::Result<DashboardOrchestrator<HtmlDashboard>> {
    let mut client = DashboardApiClient::new(&config.api_base_url, config.request_timeout)?;
    if let Some(cookie) = &config.session_cookie {
        client = client.with_session_cookie(cookie)?;
    }

    let loader_config = LoaderConfig {
        request_timeout: config.request_timeout,
        ..LoaderConfig::default()
    };

    Ok(DashboardOrchestrator::new(
        Arc::new(client),
        Arc::new(HtmlDashboard::with_all_targets()),
        loader_config,
    ))
}

/// Run the first load cycle and return it with the rendered page.
pub async fn render_dashboard(config: &Config) -> anyhow::Result<(LoadCycleReport, String)> {
    let loader = build_loader(config)?;
    tracing::info!("Loading dashboard from {}", config.api_base_url);

    let report = loader.init(config.range).await;
    loader.view().set_range(report.range);

    for (section, message) in report.errors() {
        tracing::warn!("{} section failed: {}", section, message);
    }

    Ok((report, loader.view().render_page()))
}
