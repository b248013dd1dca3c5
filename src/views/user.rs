use super::PointsView;
use crate::ledger::Balance;
use crate::models::User;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "User")]
pub struct UserView {
  pub id: Uuid,
  pub email: String,
  pub username: String,
  pub avatar_url: Option<String>,
  pub is_admin: bool,
  pub emails_enabled: bool,
  pub google_linked: bool,
  pub points: PointsView,
  pub created_at: chrono::NaiveDateTime,
}

impl UserView {
  pub fn new(user: User, balance: Balance) -> Self {
    UserView {
      id: user.id,
      email: user.email,
      username: user.username,
      avatar_url: user.avatar_url,
      is_admin: user.is_admin,
      emails_enabled: user.emails_enabled,
      google_linked: user.google_id.is_some(),
      points: balance.into(),
      created_at: user.created_at,
    }
  }
}

/// What other players may see of an account.
#[derive(Serialize, JsonSchema, Clone)]
#[serde(rename = "PublicUser")]
pub struct PublicUserView {
  pub id: Uuid,
  pub username: String,
  pub avatar_url: Option<String>,
}

impl From<User> for PublicUserView {
  fn from(user: User) -> Self {
    PublicUserView {
      id: user.id,
      username: user.username,
      avatar_url: user.avatar_url,
    }
  }
}

impl From<&User> for PublicUserView {
  fn from(user: &User) -> Self {
    user.clone().into()
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Session")]
pub struct SessionView {
  pub token: String,
}
