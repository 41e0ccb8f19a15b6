use std::{net::SocketAddr, sync::Arc};

use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use dotenv::dotenv;
use smartfridge_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LogArgs},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logger(args: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.filter));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone())?;
    let router = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;

    match (&args.server.tls_cert, &args.server.tls_key) {
        (Some(cert), Some(key)) => {
            let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
            let config = RustlsConfig::from_pem_file(cert, key).await?;

            info!("listening on https://{}", addr);
            axum_server::bind_rustls(addr, config)
                .serve(router.into_make_service())
                .await?;
        }
        _ => {
            info!("listening on http://{}", addr);
            axum_server::bind(addr)
                .serve(router.into_make_service())
                .await?;
        }
    }

    Ok(())
}
