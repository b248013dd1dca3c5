use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::WebsiteContent;
use crate::response::{MutationResponse, Response, StatusResponse};
use crate::views::ContentView;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

lazy_static! {
  static ref CONTENT_KEY_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").unwrap();
}

pub fn is_valid_key(key: &str) -> bool {
  CONTENT_KEY_REGEX.is_match(key)
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct ContentRequest {
  #[validate(length(min = 1, max = 200))]
  title: String,
  body: String,
}

/// Creates the page on first write; later writes replace title and body.
#[openapi(tag = "Arcadia")]
#[put("/admin/content/<key>", data = "<content>")]
pub async fn upsert(
  key: String,
  content: Json<ContentRequest>,
  auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<ContentView> {
  if !is_valid_key(&key) {
    return Response::field_error("key", "format");
  }

  if let Err(errors) = content.validate() {
    return Response::validation_error(errors);
  }

  let admin = auth.into_deep_inner().0;
  let content = content.into_inner();

  let content = db_conn
    .run(move |conn| {
      WebsiteContent::upsert(&key, content.title, content.body, admin.id, conn)
    })
    .await?;

  Response::success(content.into())
}

#[openapi(tag = "Arcadia")]
#[delete("/admin/content/<key>")]
pub async fn delete(
  key: String,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(WebsiteContent::find_by_key(&key)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn content_keys_are_slugs() {
    assert!(is_valid_key("about"));
    assert!(is_valid_key("privacy-policy"));
    assert!(is_valid_key("faq_2024"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("About"));
    assert!(!is_valid_key("-leading-dash"));
    assert!(!is_valid_key("with space"));
  }
}
