use crate::data_types::EmailStatus;
use crate::models::EmailLog;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "EmailLog")]
pub struct EmailLogView {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub recipient: String,
  pub template: String,
  pub subject: String,
  pub status: EmailStatus,
  pub error: Option<String>,
  pub created_at: chrono::NaiveDateTime,
}

impl From<EmailLog> for EmailLogView {
  fn from(log: EmailLog) -> Self {
    EmailLogView {
      id: log.id,
      user_id: log.user_id,
      recipient: log.recipient,
      template: log.template,
      subject: log.subject,
      status: log.status,
      error: log.error,
      created_at: log.created_at,
    }
  }
}
