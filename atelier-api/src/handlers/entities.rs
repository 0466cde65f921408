//! CRUD routes shared by every entity. Each entity picks its service out
//! of `Services`, names its list wrapper and optionally validates creates.

use actix_web::{web, HttpResponse};
use atelier_core::validation::{validate_message, validate_site_visit, validate_ticket_request};
use atelier_core::{Entity, EntityService, ServiceResult, Services};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    Brief, BriefsResponse, Document, DocumentsResponse, Message, MessagesResponse, Payment,
    PaymentsResponse, Project, ProjectsResponse, Proposal, ProposalsResponse, SiteVisit,
    SiteVisitsResponse, Ticket, TicketsResponse, Timeline, TimelinesResponse,
};
use std::sync::Arc;

use super::error::ApiError;

pub trait Resource: Entity + Serialize {
    /// Path segment under `/api`
    const PATH: &'static str;

    type List: Serialize;

    fn service(services: &Services) -> &Arc<dyn EntityService<Self>>;

    fn list(items: Vec<Self>) -> Self::List;

    fn validate(_request: &Self::Create) -> ServiceResult<()> {
        Ok(())
    }
}

macro_rules! resource {
    ($entity:ty, $path:literal, $field:ident, $list:ident { $list_field:ident }) => {
        resource!($entity, $path, $field, $list { $list_field }, |_request| Ok(()));
    };
    ($entity:ty, $path:literal, $field:ident, $list:ident { $list_field:ident }, $validate:expr) => {
        impl Resource for $entity {
            const PATH: &'static str = $path;

            type List = $list;

            fn service(services: &Services) -> &Arc<dyn EntityService<Self>> {
                &services.$field
            }

            fn list(items: Vec<Self>) -> Self::List {
                $list { $list_field: items }
            }

            fn validate(request: &Self::Create) -> ServiceResult<()> {
                let validate: fn(&Self::Create) -> ServiceResult<()> = $validate;
                validate(request)
            }
        }
    };
}

resource!(Ticket, "tickets", tickets, TicketsResponse { tickets }, validate_ticket_request);
resource!(Proposal, "proposals", proposals, ProposalsResponse { proposals });
resource!(
    Message,
    "messages",
    messages,
    MessagesResponse { messages },
    |request| validate_message(&request.content, &request.attachments)
);
resource!(Payment, "payments", payments, PaymentsResponse { payments });
resource!(Document, "documents", documents, DocumentsResponse { documents });
resource!(Brief, "briefs", briefs, BriefsResponse { briefs });
resource!(Timeline, "timelines", timelines, TimelinesResponse { timelines });
resource!(
    SiteVisit,
    "site-visits",
    site_visits,
    SiteVisitsResponse { site_visits },
    validate_site_visit
);
resource!(Project, "projects", projects, ProjectsResponse { projects });

pub async fn list<R: Resource>(services: web::Data<Services>) -> Result<HttpResponse, ApiError> {
    let items = R::service(&services).get_all().await?;
    Ok(HttpResponse::Ok().json(R::list(items)))
}

pub async fn get<R: Resource>(
    services: web::Data<Services>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let item = R::service(&services).get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

pub async fn create<R>(
    services: web::Data<Services>,
    request: web::Json<R::Create>,
) -> Result<HttpResponse, ApiError>
where
    R: Resource,
    R::Create: DeserializeOwned,
{
    let request = request.into_inner();
    R::validate(&request)?;

    let item = R::service(&services).create(request).await?;
    tracing::info!("Created {} {}", R::KIND, item.id());
    Ok(HttpResponse::Created().json(item))
}

pub async fn update<R>(
    services: web::Data<Services>,
    path: web::Path<i64>,
    request: web::Json<R::Update>,
) -> Result<HttpResponse, ApiError>
where
    R: Resource,
    R::Update: DeserializeOwned,
{
    let item = R::service(&services)
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

pub async fn delete<R: Resource>(
    services: web::Data<Services>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let item = R::service(&services).delete(path.into_inner()).await?;
    tracing::info!("Deleted {} {}", R::KIND, item.id());
    Ok(HttpResponse::Ok().json(item))
}

/// Registers the five CRUD routes for `R` under `/api/<path>`
pub fn crud<R>(cfg: &mut web::ServiceConfig)
where
    R: Resource,
    R::Create: DeserializeOwned,
    R::Update: DeserializeOwned,
{
    cfg.service(
        web::resource(format!("/api/{}", R::PATH))
            .route(web::get().to(list::<R>))
            .route(web::post().to(create::<R>)),
    )
    .service(
        web::resource(format!("/api/{}/{{id}}", R::PATH))
            .route(web::get().to(get::<R>))
            .route(web::put().to(update::<R>))
            .route(web::delete().to(delete::<R>)),
    );
}
