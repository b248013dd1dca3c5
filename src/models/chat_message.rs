use crate::schema::chat_messages;
use chrono::NaiveDateTime;
use derive_builder::Builder;
use diesel::pg::Pg;
use diesel::dsl::Find;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "ChatMessageChangeset"
)]
#[builder_struct_attr(diesel(table_name = chat_messages))]
pub struct ChatMessage {
  pub id: Uuid,
  pub user_id: Uuid,
  pub game_id: Option<Uuid>,
  pub body: String,
  pub created_at: NaiveDateTime,
}

impl ChatMessage {
  pub fn find_by_id(id: &Uuid) -> Find<chat_messages::table, Uuid> {
    chat_messages::table.find(*id)
  }

  /// Newest messages of a room first; `None` is the lobby.
  pub fn filter_for_room(
    game_id: Option<Uuid>,
    before: Option<NaiveDateTime>,
    limit: i64,
  ) -> chat_messages::BoxedQuery<'static, Pg> {
    let mut query = chat_messages::table
      .order(chat_messages::created_at.desc())
      .limit(limit)
      .into_boxed();

    query = match game_id {
      Some(game_id) => query.filter(chat_messages::game_id.eq(game_id)),
      None => query.filter(chat_messages::game_id.is_null()),
    };

    if let Some(before) = before {
      query = query.filter(chat_messages::created_at.lt(before));
    }

    query
  }

  pub fn delete_older_than(cutoff: NaiveDateTime, conn: &mut PgConnection) -> QueryResult<usize> {
    diesel::delete(chat_messages::table.filter(chat_messages::created_at.lt(cutoff))).execute(conn)
  }
}
