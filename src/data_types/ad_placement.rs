use diesel_derive_enum::DbEnum;
use rocket_okapi::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
  DbEnum, Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, JsonSchema, FromFormField,
)]
#[ExistingTypePath = "crate::schema::sql_types::AdPlacement"]
#[serde(rename_all = "snake_case")]
pub enum AdPlacement {
  #[field(value = "header")]
  Header,
  #[field(value = "sidebar")]
  Sidebar,
  #[field(value = "footer")]
  Footer,
  #[field(value = "interstitial")]
  Interstitial,
  #[field(value = "in_game")]
  InGame,
}
