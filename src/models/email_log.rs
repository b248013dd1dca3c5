use crate::data_types::EmailStatus;
use crate::schema::email_logs;
use derive_builder::Builder;
use diesel::helper_types::{Desc, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "EmailLogChangeset"
)]
#[builder_struct_attr(diesel(table_name = email_logs))]
pub struct EmailLog {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub recipient: String,
  pub template: String,
  pub subject: String,
  pub status: EmailStatus,
  pub error: Option<String>,
  pub created_at: chrono::NaiveDateTime,
}

impl EmailLog {
  pub fn newest_first() -> Order<email_logs::table, Desc<email_logs::created_at>> {
    email_logs::table.order(email_logs::created_at.desc())
  }
}
