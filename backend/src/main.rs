//! Backend entry-point: wires configuration, persistence, and REST routes.

mod server;

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, ServerSettings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::from_env(&DefaultEnv::new())
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config = ServerConfig::new(&settings);
    if let Some(database_url) = &settings.database_url {
        let pool = DbPool::new(PoolConfig::new(database_url.clone()))
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; serving with fixture ports only");
    }

    info!(addr = %config.bind_addr(), "starting attendance backend");
    server::run(config).await
}
