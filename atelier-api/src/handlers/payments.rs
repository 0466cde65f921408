use actix_web::{web, HttpResponse};
use atelier_core::store::PaymentQueries;
use atelier_core::Services;

use super::error::ApiError;

pub async fn get_summary(services: web::Data<Services>) -> Result<HttpResponse, ApiError> {
    let summary = services.payments.summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}
