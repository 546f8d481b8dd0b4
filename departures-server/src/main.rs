use departures_server::config::AppConfig;
use departures_server::departures::{DepartureAggregator, DepartureBoard};
use departures_server::ptv::{MockPtvClient, PtvClient, PtvSource};
use departures_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "departures_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    match config.mock_dir.clone() {
        Some(dir) => {
            let mock = MockPtvClient::new(&dir).expect("Failed to load mock departures");
            info!(dir = %dir.display(), stops = ?mock.available_stops(), "serving mock departures");
            serve(mock, config).await;
        }
        None => {
            let client = PtvClient::new(config.ptv.clone()).expect("Failed to create PTV client");
            serve(client, config).await;
        }
    }
}

async fn serve<S>(source: S, config: AppConfig)
where
    S: PtvSource + Send + Sync + 'static,
{
    info!(
        train_stop = %config.board.train.stop_id,
        tram_stop = %config.board.tram.stop_id,
        timezone = %config.display.timezone,
        "departure board configured"
    );

    let aggregator = DepartureAggregator::new(source, config.display);
    let board = DepartureBoard::new(aggregator, config.board);
    let app = create_router(AppState::new(board));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "PTV departures server listening");
    info!("  GET  /health");
    info!("  GET  /api/ptv/departures");
    info!("  GET  /api/ptv/search?term=..&route_types=0,1");
    info!("  GET  /api/ptv/directions/:route_id");

    axum::serve(listener, app).await.expect("Server error");
}
