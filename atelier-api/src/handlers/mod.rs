pub mod calendar;
pub mod entities;
pub mod error;
pub mod payments;
pub mod site_visits;
pub mod tickets;

use actix_web::{web, HttpResponse, Responder};
use atelier_core::Services;
use shared_types::{
    Brief, Document, Message, Payment, Project, Proposal, SiteVisit, Ticket, Timeline,
};

use entities::crud;

/// Reports whether the record store answers a project listing
pub async fn health(services: web::Data<Services>) -> impl Responder {
    match services.projects.get_all().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "store": "connected"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "store": "disconnected"
            }))
        }
    }
}

/// Routes for the whole API. Fixed paths are registered ahead of the
/// `{id}` routes they would otherwise collide with.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/tickets/search", web::get().to(tickets::search_tickets))
        .route("/api/payments/summary", web::get().to(payments::get_summary))
        .route("/api/site-visits/upcoming", web::get().to(site_visits::list_upcoming))
        .route("/api/site-visits/range", web::get().to(site_visits::list_in_range))
        .route("/api/calendar/{year}/{month}", web::get().to(calendar::get_month));

    crud::<Ticket>(cfg);
    crud::<Proposal>(cfg);
    crud::<Message>(cfg);
    crud::<Payment>(cfg);
    crud::<Document>(cfg);
    crud::<Brief>(cfg);
    crud::<Timeline>(cfg);
    crud::<SiteVisit>(cfg);
    crud::<Project>(cfg);
}

#[cfg(test)]
pub(crate) mod testing {
    use atelier_core::{Latency, MemoryStore, Services};

    /// Fixture-seeded services with no simulated delay
    pub fn services() -> Services {
        let store = MemoryStore::seeded(Latency::none()).unwrap();
        Services::in_memory(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::{configure, testing::services};
    use actix_web::{test, web, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
    }
}
