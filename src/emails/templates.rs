use super::{unsubscribe_url, Email, Recipient};
use crate::config::Config;
use crate::models::{OneTimeToken, User};
use serde_json::json;

pub fn welcome(config: &Config, user: &User) -> Email {
  Email::new(
    config,
    "welcome",
    "Welcome to Arcadia",
    json!({
      "title": "Your account is ready",
      "body": "Pick a game, set a high score and start collecting achievements.",
      "cta": "Browse Games",
      "cta_url": format!("{}/games", config.web_host),
    }),
    vec![Recipient::from_user(
      user,
      json!({
        "name": user.username,
        "unsubscribe_url": unsubscribe_url(&user.id, config),
      }),
    )],
  )
}

pub fn reset_password(config: &Config, user: &User, token: &OneTimeToken) -> Email {
  Email::new(
    config,
    "notification",
    "Reset Your Password",
    json!({
      "title": "You requested to reset your password",
      "body": "Click the button below to reset it",
      "cta": "Reset Password",
      "cta_url": format!("{}/password/reset?token={}", config.web_host, token.value),
    }),
    vec![Recipient::from_user(
      user,
      json!({
        "name": user.username,
      }),
    )],
  )
  .transactional()
}
