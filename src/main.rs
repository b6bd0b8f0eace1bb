use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use car_price_api::config::ServerConfig;
use car_price_api::inference::PriceModel;
use car_price_api::routes;
use log::{error, info};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("Starting car price prediction API");

    let config = ServerConfig::from_env()?;

    let model = match PriceModel::load(&config.model_path) {
        Ok(model) => {
            info!("Model loaded from {}", config.model_path);
            Arc::new(model)
        }
        Err(e) => {
            error!("Could not load model {}: {}", config.model_path, e);
            return Err(e.context(format!("loading model {}", config.model_path)));
        }
    };
    let model_data = web::Data::new(model);

    let bind_address = config.bind_address();
    info!("Listening on http://{} with {} workers", bind_address, config.workers);
    info!("   GET /predictCarPrice - price prediction");
    info!("   GET /model-info      - model information");
    info!("   GET /health          - health check");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(model_data.clone())
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
