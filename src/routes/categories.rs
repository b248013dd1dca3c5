use crate::guards::DbConn;
use crate::models::GameCategory;
use crate::response::{QueryResponse, Response};
use crate::views::CategoryView;
use diesel::prelude::*;
use rocket_okapi::openapi;

#[openapi(tag = "Arcadia")]
#[get("/categories")]
pub async fn list(db_conn: DbConn) -> QueryResponse<Vec<CategoryView>> {
  let categories = db_conn
    .run(|conn| GameCategory::ordered().load::<GameCategory>(conn))
    .await?;

  Response::success(categories.into_iter().map(CategoryView::from).collect())
}
