use crate::data_types::AdPlacement;
use crate::schema::advertisements;
use chrono::NaiveDateTime;
use derive_builder::Builder;
use diesel::helper_types::{Desc, Order};
use diesel::dsl::Find;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "AdvertisementChangeset"
)]
#[builder_struct_attr(diesel(table_name = advertisements))]
pub struct Advertisement {
  pub id: Uuid,
  pub name: String,
  pub placement: AdPlacement,
  pub image_url: Option<String>,
  pub html: Option<String>,
  pub target_url: String,
  pub weight: i32,
  pub active: bool,
  pub starts_at: Option<NaiveDateTime>,
  pub ends_at: Option<NaiveDateTime>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl Advertisement {
  pub fn find_by_id(id: &Uuid) -> Find<advertisements::table, Uuid> {
    advertisements::table.find(*id)
  }

  pub fn newest_first() -> Order<advertisements::table, Desc<advertisements::created_at>> {
    advertisements::table.order(advertisements::created_at.desc())
  }

  /// Active ads for a placement whose schedule window contains `now`.
  pub fn eligible(
    placement: AdPlacement,
    now: NaiveDateTime,
    conn: &mut PgConnection,
  ) -> QueryResult<Vec<Advertisement>> {
    advertisements::table
      .filter(advertisements::active.eq(true))
      .filter(advertisements::placement.eq(placement))
      .filter(
        advertisements::starts_at
          .is_null()
          .or(advertisements::starts_at.le(now)),
      )
      .filter(
        advertisements::ends_at
          .is_null()
          .or(advertisements::ends_at.gt(now)),
      )
      .load(conn)
  }

  pub fn deactivate_expired(now: NaiveDateTime, conn: &mut PgConnection) -> QueryResult<usize> {
    diesel::update(
      advertisements::table
        .filter(advertisements::active.eq(true))
        .filter(advertisements::ends_at.le(now)),
    )
    .set(advertisements::active.eq(false))
    .execute(conn)
  }
}
