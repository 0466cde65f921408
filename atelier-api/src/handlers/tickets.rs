use actix_web::{web, HttpResponse};
use atelier_core::listing::{filter_tickets, TicketFilter, TicketSort};
use atelier_core::Services;
use serde::Deserialize;
use shared_types::TicketsResponse;

use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort: TicketSort,
}

/// `GET /api/tickets/search?search=&priority=&status=&category=&sort=`
pub async fn search_tickets(
    services: web::Data<Services>,
    filter: web::Query<TicketFilter>,
    sort: web::Query<SortQuery>,
) -> Result<HttpResponse, ApiError> {
    let tickets = services.tickets.get_all().await?;
    let tickets = filter_tickets(&tickets, &filter, sort.sort);
    Ok(HttpResponse::Ok().json(TicketsResponse { tickets }))
}
