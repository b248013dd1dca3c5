use super::{Auth, AuthError, AuthFromRequest};
use crate::guards::DbConn;
use crate::models::{OneTimeToken, RESET_PASSWORD_SCOPE};
use diesel::prelude::*;
use rocket::Request;
use schemars::JsonSchema;
use serde::Deserialize;
use std::marker::PhantomData;

#[derive(Debug, Deserialize, JsonSchema, FromForm)]
pub struct OneTimeTokenParams {
  token: String,
}

pub trait OttScope: Send + Sync {
  fn scope() -> &'static str;
}

pub struct ResetPassword;

impl OttScope for ResetPassword {
  fn scope() -> &'static str {
    RESET_PASSWORD_SCOPE
  }
}

/// An unused one-time token of scope `S`, passed as `?auth[token]=...`.
pub struct Ott<S: OttScope>(OneTimeToken, PhantomData<S>);

impl<S: OttScope> Ott<S> {
  pub fn into_token(self) -> OneTimeToken {
    self.0
  }
}

impl<S: OttScope> Auth<Ott<S>> {
  pub fn into_token(self) -> OneTimeToken {
    self.into_inner().into_token()
  }
}

#[async_trait]
impl<S: OttScope> AuthFromRequest for Ott<S> {
  async fn from_request(req: &Request<'_>) -> Result<Self, AuthError> {
    let query = match req.query_value::<OneTimeTokenParams>("auth") {
      Some(Ok(query)) => query,
      _ => return Err(AuthError::Missing),
    };

    let db_conn = req
      .guard::<DbConn>()
      .await
      .succeeded()
      .ok_or_else(|| AuthError::Unavailable("database".to_string()))?;

    let token = db_conn
      .run(move |conn| OneTimeToken::find_redeemable(&query.token, S::scope()).first::<OneTimeToken>(conn))
      .await
      .map_err(|error| AuthError::lookup(error, "token"))?;

    Ok(Ott(token, PhantomData))
  }
}
