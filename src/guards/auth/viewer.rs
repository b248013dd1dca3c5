use super::jwt::Jwt;
use super::AuthFromRequest;
use crate::models::User;
use rocket::request::{FromRequest, Outcome, Request};
use rocket_okapi::{
  gen::OpenApiGenerator,
  request::{OpenApiFromRequest, RequestHeaderInput},
};

/// The signed-in user when a valid bearer token is present; never rejects.
pub struct Viewer(pub Option<User>);

impl Viewer {
  pub fn user_id(&self) -> Option<uuid::Uuid> {
    self.0.as_ref().map(|user| user.id)
  }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Viewer {
  type Error = ();

  async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
    if req.headers().get_one("authorization").is_none() {
      return Outcome::Success(Viewer(None));
    }

    let user = <Jwt<User> as AuthFromRequest>::from_request(req)
      .await
      .ok()
      .map(|jwt| jwt.into_inner());

    Outcome::Success(Viewer(user))
  }
}

impl<'a> OpenApiFromRequest<'a> for Viewer {
  fn from_request_input(
    _gen: &mut OpenApiGenerator,
    _name: String,
    _required: bool,
  ) -> rocket_okapi::Result<RequestHeaderInput> {
    Ok(RequestHeaderInput::None)
  }
}
