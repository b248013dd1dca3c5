use crate::guards::DbConn;
use crate::models::WebsiteContent;
use crate::response::{QueryResponse, Response};
use crate::views::ContentView;
use diesel::prelude::*;
use rocket_okapi::openapi;

#[openapi(tag = "Arcadia")]
#[get("/content")]
pub async fn list(db_conn: DbConn) -> QueryResponse<Vec<ContentView>> {
  let contents = db_conn
    .run(|conn| WebsiteContent::ordered().load::<WebsiteContent>(conn))
    .await?;

  Response::success(contents.into_iter().map(ContentView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[get("/content/<key>")]
pub async fn get(key: String, db_conn: DbConn) -> QueryResponse<ContentView> {
  let content = db_conn
    .run(move |conn| WebsiteContent::find_by_key(&key).first::<WebsiteContent>(conn))
    .await?;

  Response::success(content.into())
}
