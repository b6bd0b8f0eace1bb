use crate::error::ApiError;
use crate::inference::PriceModel;
use crate::models::{format_price, ApiResponse, CarFeatures, CarQuery};
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::{error, info, warn};
use std::sync::Arc;

/// Registers every route together with the query error handling they rely on.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, req: &HttpRequest| {
        warn!("Rejected query {:?}: {}", req.query_string(), err);
        ApiError::InvalidQuery(err.to_string()).into()
    }))
    .service(predict_car_price)
    .service(health_check)
    .service(model_info);
}

#[get("/predictCarPrice")]
pub async fn predict_car_price(
    model: web::Data<Arc<PriceModel>>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let query = CarQuery::from_pairs(&query).map_err(|e| {
        warn!("Rejected query: {}", e);
        e
    })?;
    let features = query.with_defaults(&CarFeatures::default());
    let model = Arc::clone(model.get_ref());

    let price = web::block(move || model.predict(&features.to_array()))
        .await
        .map_err(|e| {
            error!("Blocking prediction task failed: {}", e);
            ApiError::Blocking(e.to_string())
        })?
        .map_err(|e| {
            error!("Prediction failed for {:?}: {}", features, e);
            ApiError::Inference(e.to_string())
        })?;

    info!("Prediction: {:.2} for {:?}", price, features);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format_price(price)))
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("Car price prediction API is up"))
}

#[get("/model-info")]
pub async fn model_info(model: web::Data<Arc<PriceModel>>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(model.model_info()))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Endpoint not found"))
}
