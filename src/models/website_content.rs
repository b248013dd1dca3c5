use crate::schema::website_contents;
use derive_builder::Builder;
use diesel::dsl::FindBy;
use diesel::helper_types::{Asc, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "WebsiteContentChangeset"
)]
#[builder_struct_attr(diesel(table_name = website_contents))]
pub struct WebsiteContent {
  pub id: Uuid,
  pub key: String,
  pub title: String,
  pub body: String,
  pub updated_by: Option<Uuid>,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

impl WebsiteContent {
  pub fn find_by_key(key: &str) -> FindBy<website_contents::table, website_contents::key, String> {
    website_contents::table.filter(website_contents::key.eq(key.to_string()))
  }

  pub fn ordered() -> Order<website_contents::table, Asc<website_contents::key>> {
    website_contents::table.order(website_contents::key.asc())
  }

  pub fn upsert(
    key: &str,
    title: String,
    body: String,
    updated_by: Uuid,
    conn: &mut PgConnection,
  ) -> QueryResult<WebsiteContent> {
    diesel::insert_into(website_contents::table)
      .values((
        website_contents::key.eq(key.to_string()),
        website_contents::title.eq(title.clone()),
        website_contents::body.eq(body.clone()),
        website_contents::updated_by.eq(Some(updated_by)),
      ))
      .on_conflict(website_contents::key)
      .do_update()
      .set((
        website_contents::title.eq(title),
        website_contents::body.eq(body),
        website_contents::updated_by.eq(Some(updated_by)),
      ))
      .get_result(conn)
  }
}
