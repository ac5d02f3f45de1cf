use tracing_subscriber::EnvFilter;

use medcalc_api::config::{ApiConfig, LogFormat};
use medcalc_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ApiConfig::from_env()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    medcalc_calculators::check_registry()?;

    let state = AppState {
        form_options: config.form_options,
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        validation_mode = ?config.form_options.validation_mode,
        trim = ?config.form_options.trim,
        "medcalc api listening"
    );
    axum::serve(listener, medcalc_api::router(state)).await?;
    Ok(())
}
