use diesel_derive_enum::DbEnum;
use rocket_okapi::JsonSchema;
use serde::Serialize;

#[derive(DbEnum, Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, JsonSchema)]
#[ExistingTypePath = "crate::schema::sql_types::EmailStatus"]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
  Sent,
  Failed,
  Skipped,
}
