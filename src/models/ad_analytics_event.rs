use crate::data_types::AdEvent;
use crate::schema::ad_analytics;
use chrono::NaiveDateTime;
use derive_builder::Builder;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "AdAnalyticsEventChangeset"
)]
#[builder_struct_attr(diesel(table_name = ad_analytics))]
#[diesel(table_name = ad_analytics)]
pub struct AdAnalyticsEvent {
  pub id: Uuid,
  pub advertisement_id: Uuid,
  pub event: AdEvent,
  pub user_id: Option<Uuid>,
  pub page: Option<String>,
  pub created_at: NaiveDateTime,
}

impl AdAnalyticsEvent {
  pub fn since(
    advertisement_id: &Uuid,
    since: NaiveDateTime,
    conn: &mut PgConnection,
  ) -> QueryResult<Vec<(AdEvent, NaiveDateTime)>> {
    ad_analytics::table
      .filter(ad_analytics::advertisement_id.eq(*advertisement_id))
      .filter(ad_analytics::created_at.ge(since))
      .select((ad_analytics::event, ad_analytics::created_at))
      .load(conn)
  }
}
