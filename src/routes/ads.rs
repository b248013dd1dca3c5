use crate::ads;
use crate::data_types::{AdEvent, AdPlacement};
use crate::guards::{DbConn, Viewer};
use crate::models::{AdAnalyticsEventChangeset, Advertisement};
use crate::response::{MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::{ad_analytics, advertisements};
use crate::views::AdView;
use chrono::Utc;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

const MAX_PAGE_LENGTH: usize = 500;

#[derive(Deserialize, JsonSchema)]
pub struct AdEventRequest {
  page: Option<String>,
}

/// The event body is optional; beacons may post nothing at all.
fn event_page(event: Option<Json<AdEventRequest>>) -> Option<String> {
  event
    .and_then(|event| event.into_inner().page)
    .map(|page| page.chars().take(MAX_PAGE_LENGTH).collect())
}

#[openapi(tag = "Arcadia")]
#[get("/ads?<placement>")]
pub async fn get(placement: AdPlacement, db_conn: DbConn) -> QueryResponse<AdView> {
  let now = Utc::now().naive_utc();

  let eligible = db_conn
    .run(move |conn| Advertisement::eligible(placement, now, conn))
    .await?;

  match ads::pick(&eligible, &mut rand::thread_rng()) {
    Some(ad) => Response::success(ad.clone().into()),
    None => Response::query_error(Status::NotFound),
  }
}

async fn record(
  id: Uuid,
  event: AdEvent,
  page: Option<String>,
  viewer: Viewer,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let user_id = viewer.user_id();

  db_conn
    .run(move |conn| {
      Advertisement::find_by_id(&id)
        .select(advertisements::id)
        .first::<Uuid>(conn)?;

      diesel::insert_into(ad_analytics::table)
        .values(
          AdAnalyticsEventChangeset::default()
            .advertisement_id(id)
            .event(event)
            .user_id(user_id)
            .page(page),
        )
        .execute(conn)
    })
    .await?;

  Response::status(Status::Created)
}

#[openapi(tag = "Arcadia")]
#[post("/ads/<id>/impressions", data = "<event>")]
pub async fn create_impression(
  id: Uuid,
  event: Option<Json<AdEventRequest>>,
  viewer: Viewer,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  record(id, AdEvent::Impression, event_page(event), viewer, db_conn).await
}

#[openapi(tag = "Arcadia")]
#[post("/ads/<id>/clicks", data = "<event>")]
pub async fn create_click(
  id: Uuid,
  event: Option<Json<AdEventRequest>>,
  viewer: Viewer,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  record(id, AdEvent::Click, event_page(event), viewer, db_conn).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use rocket::local::blocking::Client;

  #[post("/events", data = "<event>")]
  fn page(event: Option<Json<AdEventRequest>>) -> String {
    event_page(event).unwrap_or_else(|| "none".to_string())
  }

  #[test]
  fn event_body_is_optional() {
    let client = Client::tracked(rocket::build().mount("/", routes![page])).unwrap();

    let response = client.post("/events").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "none");

    let response = client.post("/events").body("{}").dispatch();
    assert_eq!(response.into_string().unwrap(), "none");

    let response = client.post("/events").body(r#"{"page":"/games/snake"}"#).dispatch();
    assert_eq!(response.into_string().unwrap(), "/games/snake");
  }

  #[test]
  fn truncates_long_pages() {
    let event = AdEventRequest {
      page: Some("p".repeat(MAX_PAGE_LENGTH + 20)),
    };

    let page = event_page(Some(Json(event))).unwrap();
    assert_eq!(page.chars().count(), MAX_PAGE_LENGTH);
  }
}
