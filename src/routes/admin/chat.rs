use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::ChatMessage;
use crate::response::{MutationResponse, Response, StatusResponse};
use diesel::prelude::*;
use rocket::http::Status;
use rocket_okapi::openapi;
use uuid::Uuid;

#[openapi(tag = "Arcadia")]
#[delete("/admin/chat/<id>")]
pub async fn delete(
  id: Uuid,
  auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(ChatMessage::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  log::info!("admin {} deleted chat message {}", auth.into_deep_inner().0.id, id);

  Response::status(Status::NoContent)
}
