use crate::models::WebsiteContent;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Content")]
pub struct ContentView {
  pub key: String,
  pub title: String,
  pub body: String,
  pub updated_by: Option<Uuid>,
  pub updated_at: chrono::NaiveDateTime,
}

impl From<WebsiteContent> for ContentView {
  fn from(content: WebsiteContent) -> Self {
    ContentView {
      key: content.key,
      title: content.title,
      body: content.body,
      updated_by: content.updated_by,
      updated_at: content.updated_at,
    }
  }
}
