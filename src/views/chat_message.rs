use super::PublicUserView;
use crate::models::{ChatMessage, User};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "ChatMessage")]
pub struct ChatMessageView {
  pub id: Uuid,
  pub game_id: Option<Uuid>,
  pub body: String,
  pub author: Option<PublicUserView>,
  pub created_at: chrono::NaiveDateTime,
}

impl ChatMessageView {
  pub fn new(message: ChatMessage, author: Option<User>) -> Self {
    ChatMessageView {
      id: message.id,
      game_id: message.game_id,
      body: message.body,
      author: author.map(Into::into),
      created_at: message.created_at,
    }
  }
}
