use crate::data_types::GameSource;
use crate::schema::games;
use derive_builder::Builder;
use diesel::dsl::{And, Eq, Filter, Find};
use diesel::helper_types::{Desc, Limit, Order};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::PgTextExpressionMethods;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "GameChangeset"
)]
#[builder_struct_attr(diesel(table_name = games))]
pub struct Game {
  pub id: Uuid,
  pub title: String,
  pub slug: String,
  pub description: String,
  pub instructions: String,
  pub category_id: Option<Uuid>,
  pub thumbnail_url: Option<String>,
  pub embed_url: String,
  pub source: GameSource,
  pub featured: bool,
  pub published: bool,
  pub play_count: i64,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

#[derive(Default)]
pub struct GameFilter {
  pub category_id: Option<Uuid>,
  pub query: Option<String>,
  pub featured: Option<bool>,
}

#[allow(clippy::type_complexity)]
impl Game {
  pub fn find_by_id(id: &Uuid) -> Find<games::table, Uuid> {
    games::table.find(*id)
  }

  pub fn find_published(
    id: &Uuid,
  ) -> Filter<games::table, And<Eq<games::id, Uuid>, Eq<games::published, bool>>> {
    games::table.filter(games::id.eq(*id).and(games::published.eq(true)))
  }

  pub fn find_published_by_slug(
    slug: &str,
  ) -> Filter<games::table, And<Eq<games::slug, String>, Eq<games::published, bool>>> {
    games::table.filter(games::slug.eq(slug.to_string()).and(games::published.eq(true)))
  }

  pub fn filter_published(filter: GameFilter) -> games::BoxedQuery<'static, Pg> {
    let mut query = games::table
      .filter(games::published.eq(true))
      .order(games::created_at.desc())
      .into_boxed();

    if let Some(category_id) = filter.category_id {
      query = query.filter(games::category_id.eq(category_id));
    }

    if let Some(featured) = filter.featured {
      query = query.filter(games::featured.eq(featured));
    }

    if let Some(text) = filter.query {
      query = query.filter(games::title.ilike(format!("%{}%", escape_like(&text))));
    }

    query
  }

  pub fn popular(
    limit: i64,
  ) -> Limit<Order<Filter<games::table, Eq<games::published, bool>>, Desc<games::play_count>>> {
    games::table
      .filter(games::published.eq(true))
      .order(games::play_count.desc())
      .limit(limit)
  }

  pub fn newest_first() -> Order<games::table, Desc<games::created_at>> {
    games::table.order(games::created_at.desc())
  }

  pub fn increment_play_count(id: &Uuid, conn: &mut PgConnection) -> QueryResult<i64> {
    diesel::update(games::table.find(*id))
      .set(games::play_count.eq(games::play_count + 1_i64))
      .returning(games::play_count)
      .get_result(conn)
  }
}

fn escape_like(text: &str) -> String {
  text
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
  use super::*;
  use diesel::debug_query;

  #[test]
  fn escapes_like_wildcards() {
    assert_eq!(escape_like("100%_fun"), "100\\%\\_fun");
    assert_eq!(escape_like("plain"), "plain");
  }

  #[test]
  fn published_lookup_hides_drafts() {
    let id = Uuid::new_v4();
    let sql = debug_query::<Pg, _>(&Game::find_published(&id).select(games::id)).to_string();

    assert!(sql.contains(r#""games"."id" = $1"#));
    assert!(sql.contains(r#""games"."published" = $2"#));
    assert!(sql.ends_with(&format!("-- binds: [{}, true]", id)));
  }
}
