use database::db::create_connection;
use log::{error, info};
use server::{
    app, config::AppConfig, error::StartupError, state::AppState,
    utils::shutdown::shutdown_signal,
};

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    let db = create_connection(&config.database).await?;
    info!("Connected to database");

    let app = app(AppState {
        db,
        current_semester: config.current_semester,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}
