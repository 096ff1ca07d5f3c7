use anyhow::Result;
use hems_simulator::{api, config, simulator::TelemetrySimulator, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let simulator = TelemetrySimulator::start(&cfg.simulator);
    let app = api::router(simulator.clone(), &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!(
            "Server binding to 0.0.0.0 - the demo backend will be reachable from the network \
            with its fixed demo credentials."
        );
    }

    info!(%addr, tick_secs = simulator.tick_period().as_secs(), "starting HEMS telemetry simulator");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    simulator.destroy();
    warn!("shutdown complete");
    Ok(())
}
