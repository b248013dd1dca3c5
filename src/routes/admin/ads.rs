use crate::ads::AnalyticsSummary;
use crate::data_types::AdPlacement;
use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::{AdAnalyticsEvent, Advertisement, AdvertisementChangeset};
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::advertisements;
use crate::views::{AdAnalyticsView, AdvertisementView};
use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_ANALYTICS_DAYS: i64 = 30;
const MAX_ANALYTICS_DAYS: i64 = 90;

fn default_weight() -> i32 {
  1
}

fn default_active() -> bool {
  true
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct AdvertisementRequest {
  #[validate(length(min = 1, max = 100))]
  name: String,
  placement: AdPlacement,
  #[validate(url)]
  image_url: Option<String>,
  html: Option<String>,
  #[validate(url)]
  target_url: String,
  #[validate(range(min = 1, max = 1000))]
  #[serde(default = "default_weight")]
  weight: i32,
  #[serde(default = "default_active")]
  active: bool,
  starts_at: Option<NaiveDateTime>,
  ends_at: Option<NaiveDateTime>,
}

impl AdvertisementRequest {
  /// Field and code of the first inconsistency the validator cannot see.
  fn creative_error(&self) -> Option<(&'static str, &'static str)> {
    if self.image_url.is_none() && self.html.as_deref().map_or(true, str::is_empty) {
      return Some(("image_url", "required"));
    }

    if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
      if ends_at <= starts_at {
        return Some(("ends_at", "before_start"));
      }
    }

    None
  }

  fn changeset(&self) -> AdvertisementChangeset {
    AdvertisementChangeset::default()
      .name(self.name.trim().to_string())
      .placement(self.placement)
      .image_url(self.image_url.clone())
      .html(self.html.clone())
      .target_url(self.target_url.clone())
      .weight(self.weight)
      .active(self.active)
      .starts_at(self.starts_at)
      .ends_at(self.ends_at)
  }
}

#[openapi(tag = "Arcadia")]
#[get("/admin/ads?<page>")]
pub async fn list(
  page: Option<i64>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> QueryResponse<PaginatedResult<AdvertisementView>> {
  let page = page.unwrap_or(1);

  let ads = db_conn
    .run(move |conn| {
      Advertisement::newest_first()
        .paginate(page)
        .load_and_count_pages::<Advertisement>(conn)
    })
    .await?;

  let views = ads
    .records
    .iter()
    .cloned()
    .map(AdvertisementView::from)
    .collect();

  Response::success(ads.records(views))
}

#[openapi(tag = "Arcadia")]
#[post("/admin/ads", data = "<ad>")]
pub async fn create(
  ad: Json<AdvertisementRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<AdvertisementView> {
  if let Err(errors) = ad.validate() {
    return Response::validation_error(errors);
  }

  if let Some((field, code)) = ad.creative_error() {
    return Response::field_error(field, code);
  }

  let changeset = ad.changeset();

  let ad = db_conn
    .run(move |conn| {
      diesel::insert_into(advertisements::table)
        .values(changeset)
        .get_result::<Advertisement>(conn)
    })
    .await?;

  Response::success(ad.into())
}

#[openapi(tag = "Arcadia")]
#[put("/admin/ads/<id>", data = "<ad>")]
pub async fn update(
  id: Uuid,
  ad: Json<AdvertisementRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<AdvertisementView> {
  if let Err(errors) = ad.validate() {
    return Response::validation_error(errors);
  }

  if let Some((field, code)) = ad.creative_error() {
    return Response::field_error(field, code);
  }

  let changeset = ad.changeset();

  let ad = db_conn
    .run(move |conn| {
      diesel::update(Advertisement::find_by_id(&id))
        .set(changeset)
        .get_result::<Advertisement>(conn)
    })
    .await?;

  Response::success(ad.into())
}

#[openapi(tag = "Arcadia")]
#[delete("/admin/ads/<id>")]
pub async fn delete(
  id: Uuid,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(Advertisement::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}

/// Impressions and clicks per UTC day over the last `days` days, today included.
#[openapi(tag = "Arcadia")]
#[get("/admin/ads/<id>/analytics?<days>")]
pub async fn analytics(
  id: Uuid,
  days: Option<i64>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> QueryResponse<AdAnalyticsView> {
  let days = days
    .unwrap_or(DEFAULT_ANALYTICS_DAYS)
    .clamp(1, MAX_ANALYTICS_DAYS);

  let last_day = Utc::now().date_naive();
  let first_day = last_day - Duration::days(days - 1);
  let since = first_day.and_time(NaiveTime::MIN);

  let events = db_conn
    .run(move |conn| {
      Advertisement::find_by_id(&id)
        .select(advertisements::id)
        .first::<Uuid>(conn)?;

      AdAnalyticsEvent::since(&id, since, conn)
    })
    .await?;

  Response::success(AdAnalyticsView {
    advertisement_id: id,
    summary: AnalyticsSummary::from_events(&events, first_day, last_day),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request() -> AdvertisementRequest {
    AdvertisementRequest {
      name: "Spring sale".to_string(),
      placement: AdPlacement::Header,
      image_url: Some("https://cdn.example.com/banner.png".to_string()),
      html: None,
      target_url: "https://example.com".to_string(),
      weight: 1,
      active: true,
      starts_at: None,
      ends_at: None,
    }
  }

  #[test]
  fn creatives_need_an_image_or_html() {
    let mut ad = request();
    assert_eq!(ad.creative_error(), None);

    ad.image_url = None;
    assert_eq!(ad.creative_error(), Some(("image_url", "required")));

    ad.html = Some("<b>Sale</b>".to_string());
    assert_eq!(ad.creative_error(), None);
  }

  #[test]
  fn schedule_must_end_after_it_starts() {
    let mut ad = request();
    let now = Utc::now().naive_utc();

    ad.starts_at = Some(now);
    ad.ends_at = Some(now);
    assert_eq!(ad.creative_error(), Some(("ends_at", "before_start")));

    ad.ends_at = Some(now + Duration::days(7));
    assert_eq!(ad.creative_error(), None);
  }
}
