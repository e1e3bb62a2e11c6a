use actix_web::{web, App, HttpServer};
use tokio::net::TcpListener;
use tracing::{error, info};

use skatrunde::config::Config;
use skatrunde::registry::UserStore;
use skatrunde::routes;
use skatrunde::server::{serve, Table, TableConfig};
use skatrunde::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!(
        table_addr = %config.table_addr,
        http_addr = %config.http_addr,
        "starting skatrunde server"
    );

    let store = web::Data::new(UserStore::open(&config.data_dir)?);

    let table = Table::new(TableConfig {
        server_password: config.server_password.clone(),
        handshake_timeout: config.handshake_timeout,
        ..TableConfig::default()
    })
    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    let listener = TcpListener::bind(&config.table_addr).await?;
    let table_for_listener = table.clone();
    tokio::spawn(async move {
        if let Err(err) = serve(table_for_listener, listener).await {
            error!(%err, "table listener failed");
        }
    });

    let app_config = web::Data::new(config.clone());
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(app_config.clone())
            .configure(routes::configure)
    })
    .bind(&config.http_addr)?
    .run()
    .await?;

    table.shutdown().await;
    Ok(())
}
