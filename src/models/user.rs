use crate::schema::users;
use derive_builder::Builder;
use diesel::dsl::{Find, FindBy};
use diesel::helper_types::{Desc, EqAny, Filter, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "UserChangeset"
)]
#[builder_struct_attr(diesel(table_name = users))]
pub struct User {
  pub id: Uuid,
  pub email: String,
  pub username: String,
  pub password: Option<String>,
  pub google_id: Option<String>,
  pub avatar_url: Option<String>,
  pub is_admin: bool,
  pub emails_enabled: bool,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

/// Emails are stored and compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

impl User {
  pub fn find_by_id(id: &Uuid) -> Find<users::table, Uuid> {
    users::table.find(*id)
  }

  pub fn find_by_email(email: &str) -> FindBy<users::table, users::email, String> {
    users::table.filter(users::email.eq(normalize_email(email)))
  }

  pub fn find_by_username(username: &str) -> FindBy<users::table, users::username, String> {
    users::table.filter(users::username.eq(username.to_string()))
  }

  pub fn find_by_google_id(google_id: &str) -> FindBy<users::table, users::google_id, String> {
    users::table.filter(users::google_id.eq(google_id.to_string()))
  }

  pub fn filter_by_ids(ids: Vec<Uuid>) -> Filter<users::table, EqAny<users::id, Vec<Uuid>>> {
    users::table.filter(users::id.eq_any(ids))
  }

  pub fn newest_first() -> Order<users::table, Desc<users::created_at>> {
    users::table.order(users::created_at.desc())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_emails() {
    assert_eq!(normalize_email(" Ada@Example.COM\n"), "ada@example.com");
    assert_eq!(normalize_email("bob@example.com"), "bob@example.com");
  }
}
