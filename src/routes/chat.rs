use crate::achievements::{self, Trigger};
use crate::chat::{parse_cursor, sanitize_message};
use crate::config::Config;
use crate::data_types::AchievementCriteria;
use crate::guards::{Auth, DbConn, Jwt};
use crate::ledger::LedgerError;
use crate::models::{ChatMessage, ChatMessageChangeset, Game, User};
use crate::response::{MutationResponse, QueryResponse, Response};
use crate::schema::{chat_messages, games};
use crate::views::ChatMessageView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Deserialize, JsonSchema)]
pub struct CreateChatMessageRequest {
  body: String,
  game_id: Option<Uuid>,
}

/// Recent messages of a room, oldest first. Without `game_id` this is the lobby.
#[openapi(tag = "Arcadia")]
#[get("/chat?<game_id>&<before>")]
pub async fn list(
  game_id: Option<Uuid>,
  before: Option<String>,
  config: &State<Config>,
  db_conn: DbConn,
) -> QueryResponse<Vec<ChatMessageView>> {
  let before = match before.as_deref() {
    Some(before) => match parse_cursor(before) {
      Some(before) => Some(before),
      None => return Response::query_error(Status::BadRequest),
    },
    None => None,
  };

  let limit = config.chat_history_limit;

  let (messages, users) = db_conn
    .run(move |conn| {
      let messages = ChatMessage::filter_for_room(game_id, before, limit).load::<ChatMessage>(conn)?;
      let user_ids = messages.iter().map(|message| message.user_id).collect();
      let users = User::filter_by_ids(user_ids).load::<User>(conn)?;

      Ok::<_, diesel::result::Error>((messages, users))
    })
    .await?;

  let views = messages
    .into_iter()
    .rev()
    .map(|message| {
      let author = users.iter().find(|user| user.id == message.user_id).cloned();
      ChatMessageView::new(message, author)
    })
    .collect();

  Response::success(views)
}

#[openapi(tag = "Arcadia")]
#[post("/chat", data = "<message>")]
pub async fn create(
  message: Json<CreateChatMessageRequest>,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<ChatMessageView> {
  let body = match sanitize_message(&message.body) {
    Ok(body) => body,
    Err(error) => {
      let mut errors = ValidationErrors::new();
      errors.add("body", error);
      return Response::validation_error(errors);
    }
  };

  let user = auth.into_deep_inner();
  let user_id = user.id;
  let game_id = message.game_id;

  let message = db_conn
    .run(move |conn| {
      if let Some(game_id) = game_id {
        Game::find_published(&game_id)
          .select(games::id)
          .first::<Uuid>(conn)?;
      }

      let message = diesel::insert_into(chat_messages::table)
        .values(
          ChatMessageChangeset::default()
            .user_id(user_id)
            .game_id(game_id)
            .body(body),
        )
        .get_result::<ChatMessage>(conn)?;

      achievements::evaluate(
        conn,
        &user_id,
        Trigger::new(AchievementCriteria::ChatMessages, game_id),
      )?;

      Ok::<_, LedgerError>(message)
    })
    .await?;

  Response::success(ChatMessageView::new(message, Some(user)))
}
