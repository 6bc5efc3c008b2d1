mod config;
mod main_lib;

use config::Config;
use main_lib::{init_tracing, render_dashboard};
use tokio::io::AsyncWriteExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let (report, html) = render_dashboard(&config).await?;

    match &config.output {
        Some(path) => {
            tokio::fs::write(path, html.as_bytes()).await?;
            tracing::info!("Dashboard written to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(html.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    match report.total_profit {
        Some(total) => tracing::info!("Total profit for {}: {}", report.range, total.value),
        None => tracing::info!("Total profit for {} not available", report.range),
    }
    Ok(())
}
