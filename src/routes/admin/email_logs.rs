use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::EmailLog;
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{QueryResponse, Response};
use crate::views::EmailLogView;
use rocket_okapi::openapi;

#[openapi(tag = "Arcadia")]
#[get("/admin/email_logs?<page>")]
pub async fn list(
  page: Option<i64>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> QueryResponse<PaginatedResult<EmailLogView>> {
  let page = page.unwrap_or(1);

  let logs = db_conn
    .run(move |conn| {
      EmailLog::newest_first()
        .paginate(page)
        .load_and_count_pages::<EmailLog>(conn)
    })
    .await?;

  let views = logs.records.iter().cloned().map(EmailLogView::from).collect();

  Response::success(logs.records(views))
}
