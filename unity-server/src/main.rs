use unity_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment and logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger(&config.log_level);

    tracing::info!(
        environment = %config.environment,
        "Unity order server starting..."
    );

    // 2. Initialize state (opens the database and runs first-boot seeding)
    let state = ServerState::initialize(&config)?;

    // 3. Run the HTTP server until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
