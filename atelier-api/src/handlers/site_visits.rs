use actix_web::{web, HttpResponse};
use atelier_core::store::SiteVisitQueries;
use atelier_core::Services;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared_types::SiteVisitsResponse;

use super::error::ApiError;

const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub async fn list_upcoming(
    services: web::Data<Services>,
    query: web::Query<UpcomingQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    let site_visits = services.site_visits.upcoming(limit, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(SiteVisitsResponse { site_visits }))
}

pub async fn list_in_range(
    services: web::Data<Services>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.end < query.start {
        return Err(ApiError::bad_request("end", "Range end must not be before its start"));
    }
    let site_visits = services
        .site_visits
        .by_date_range(query.start, query.end)
        .await?;
    Ok(HttpResponse::Ok().json(SiteVisitsResponse { site_visits }))
}

#[cfg(test)]
mod tests {
    use super::super::{configure, testing::services};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use chrono::{Duration, SecondsFormat, Utc};
    use serde_json::{json, Value};

    fn ids(body: &Value) -> Vec<i64> {
        body["site_visits"]
            .as_array()
            .map(|visits| visits.iter().filter_map(|v| v["id"].as_i64()).collect())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_range_is_inclusive() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/site-visits/range?start=2024-04-01T00:00:00Z&end=2024-05-06T14:00:00Z")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec![2, 3]);

        let req = test::TestRequest::get()
            .uri("/api/site-visits/range?start=2024-05-01T00:00:00Z&end=2024-04-01T00:00:00Z")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_upcoming_skips_past_and_cancelled() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services()))
                .configure(configure),
        )
        .await;

        let now = Utc::now();
        let visits = [
            ("Final walkthrough", 10, "scheduled"),
            ("Punch list review", 3, "confirmed"),
            ("Cancelled measure", 1, "cancelled"),
        ];
        for (title, days, status) in visits {
            let start = now + Duration::days(days);
            let req = test::TestRequest::post()
                .uri("/api/site-visits")
                .set_json(json!({
                    "title": title,
                    "date": start.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "end_date": (start + Duration::hours(2)).to_rfc3339_opts(SecondsFormat::Secs, true),
                    "status": status,
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/site-visits/upcoming")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec![5, 4]);

        let req = test::TestRequest::get()
            .uri("/api/site-visits/upcoming?limit=1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec![5]);
    }
}
