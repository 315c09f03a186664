#[macro_use]
extern crate tracing;

use std::net::SocketAddr;

use clap::Parser;
use portico::{serve, PorticoConfig, PorticoError};
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, EnvFilter, FmtSubscriber};

#[tokio::main]
pub async fn main() -> Result<(), PorticoError> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber.with(Layer::default().pretty()))?;

    let config = PorticoConfig::parse();
    config.validate()?;

    let socket_address: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(socket_address).await?;

    info!("Server listening on {}", socket_address);
    info!("Logins are restricted to @{} accounts", config.allowed_domain);

    serve(listener, config).await?;

    Ok(())
}
