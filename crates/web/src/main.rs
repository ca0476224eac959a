use std::error::Error;

use database::{DatabaseConnectionInfo, PgDatabase};
use directory::client::Client;
use web::{config::ServerConfig, start_web_server, WebState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // configuration
    let server_config = ServerConfig::from_env()?;
    let database_connection_info = DatabaseConnectionInfo::from_env()?;

    // database
    let database = PgDatabase::connect(database_connection_info).await?;

    // web server
    start_web_server(
        WebState {
            directory: Client::new(database),
        },
        server_config,
    )
    .await?;

    Ok(())
}
