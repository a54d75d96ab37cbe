use portfolio::app_state::AppState;
use portfolio::configuration::get_configuration;
use portfolio::create_app;
use portfolio::errors::Error;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn bind_address(host: &str, port: u16) -> Result<SocketAddr, Error> {
    let host = IpAddr::from_str(host)?;
    Ok(SocketAddr::from((host, port)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portfolio=info,tower_http=info")),
        )
        .init();

    let configuration = get_configuration()?;
    configuration.application.check_if_valid()?;
    let addr = bind_address(
        &configuration.application.host,
        configuration.application.port,
    )?;
    let app_state = AppState::try_init(&configuration)?;
    let app = create_app(app_state, &configuration.application.static_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
