use actix_web::{web, HttpResponse};
use atelier_core::calendar::{month_grid, month_title, CalendarDay};
use atelier_core::Services;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DaySummary {
    #[serde(flatten)]
    pub day: CalendarDay,
    pub visit_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub title: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<DaySummary>,
}

/// `GET /api/calendar/{year}/{month}`: six-week grid with visits per day
pub async fn get_month(
    services: web::Data<Services>,
    path: web::Path<(i32, u32)>,
) -> Result<HttpResponse, ApiError> {
    let (year, month) = path.into_inner();
    let today = Utc::now().date_naive();
    let (grid, title) = match (month_grid(year, month, today), month_title(year, month)) {
        (Some(grid), Some(title)) => (grid, title),
        _ => {
            return Err(ApiError::bad_request(
                "month",
                format!("Invalid month: {}-{}", year, month),
            ))
        }
    };

    let visits = services.site_visits.get_all().await?;
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for visit in &visits {
        *per_day.entry(visit.date.date_naive()).or_default() += 1;
    }

    let days = grid
        .into_iter()
        .map(|day| DaySummary {
            visit_count: per_day.get(&day.date).copied().unwrap_or(0),
            day,
        })
        .collect();

    Ok(HttpResponse::Ok().json(MonthResponse {
        title,
        year,
        month,
        days,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::{configure, testing::services};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_month_grid_counts_visits() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/calendar/2024/4").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "April 2024");

        let days = body["days"].as_array().cloned().unwrap_or_default();
        assert_eq!(days.len(), 42);
        // April 2024 starts on a Monday
        assert_eq!(days[0]["date"], "2024-03-31");
        assert_eq!(days[0]["in_current_month"], false);

        // Trailing May days in the grid carry their visits too
        let busy: Vec<&Value> = days.iter().filter(|d| d["visit_count"] != 0).collect();
        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0]["date"], "2024-04-12");
        assert_eq!(busy[0]["in_current_month"], true);
        assert_eq!(busy[1]["date"], "2024-05-06");
        assert_eq!(busy[1]["in_current_month"], false);
    }

    #[actix_web::test]
    async fn test_invalid_month_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/calendar/2024/13").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/calendar/262142/12")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
