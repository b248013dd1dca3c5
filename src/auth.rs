use crate::config::Config;
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use slugify::slugify;
use uuid::Uuid;
use validator::ValidationError;

const SUBJECT_PREFIX: &str = "user:";
const MAX_USERNAME_LENGTH: usize = 32;

lazy_static! {
  static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]{3,32}$").unwrap();
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
  pub sub: String,
  pub exp: usize,
  pub iss: String,
}

impl Claims {
  pub fn user_id(&self) -> Option<Uuid> {
    self
      .sub
      .strip_prefix(SUBJECT_PREFIX)
      .and_then(|id| Uuid::parse_str(id).ok())
  }
}

pub fn generate_token(user: &User, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
  generate_token_for(&user.id, config, Duration::hours(config.session_ttl_hours))
}

fn generate_token_for(
  user_id: &Uuid,
  config: &Config,
  ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
  let exp = (Utc::now() + ttl).timestamp().max(0) as usize;

  let claims = Claims {
    sub: format!("{}{}", SUBJECT_PREFIX, user_id),
    exp,
    iss: config.host.clone(),
  };

  let key = EncodingKey::from_secret(config.auth_client_secret.as_ref());
  encode(&Header::new(Algorithm::HS256), &claims, &key)
}

pub fn decode_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
  let mut validation = Validation::new(Algorithm::HS256);
  validation.set_issuer(&[config.host.as_str()]);

  let key = DecodingKey::from_secret(config.auth_client_secret.as_ref());
  decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
  if USERNAME_REGEX.is_match(username) {
    Ok(())
  } else {
    Err(ValidationError::new("username_format"))
  }
}

/// Username base for accounts created through Google sign-in.
pub fn derive_username(name: Option<&str>, email: &str) -> String {
  let source = name
    .filter(|name| !name.trim().is_empty())
    .unwrap_or_else(|| email.split('@').next().unwrap_or(email));

  let mut username: String = slugify!(source, separator = "_")
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    .take(MAX_USERNAME_LENGTH - 4)
    .collect();

  if username.len() < 3 {
    username = format!("player_{}", username);
  }

  username
}

/// Candidates tried in order until one is free: `name`, `name_2`, `name_3`, ...
pub fn username_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
  std::iter::once(base.to_string()).chain((2..).map(move |n| format!("{}_{}", base, n)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::test_config;

  #[test]
  fn token_subject_identifies_user() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let token = generate_token_for(&user_id, &config, Duration::hours(1)).unwrap();
    let claims = decode_token(&token, &config).unwrap();

    assert_eq!(claims.user_id(), Some(user_id));
    assert_eq!(claims.iss, config.host);
  }

  #[test]
  fn expired_tokens_are_rejected() {
    let config = test_config();
    let token = generate_token_for(&Uuid::new_v4(), &config, Duration::days(-1)).unwrap();

    assert!(decode_token(&token, &config).is_err());
  }

  #[test]
  fn tokens_signed_with_another_secret_are_rejected() {
    let config = test_config();
    let mut other = test_config();
    other.auth_client_secret = "another secret".to_string();

    let token = generate_token_for(&Uuid::new_v4(), &other, Duration::hours(1)).unwrap();

    assert!(decode_token(&token, &config).is_err());
  }

  #[test]
  fn malformed_subject_has_no_user() {
    let claims = Claims {
      sub: "admin:42".to_string(),
      exp: 0,
      iss: String::new(),
    };

    assert_eq!(claims.user_id(), None);
  }

  #[test]
  fn usernames_are_restricted() {
    assert!(validate_username("pixel_hero_99").is_ok());
    assert!(validate_username("ab").is_err());
    assert!(validate_username("no spaces").is_err());
    assert!(validate_username(&"x".repeat(33)).is_err());
  }

  #[test]
  fn derives_usernames_from_profile() {
    assert_eq!(derive_username(Some("Ada Lovelace"), "ada@example.com"), "ada_lovelace");
    assert_eq!(derive_username(None, "jo@example.com"), "player_jo");
    assert_eq!(derive_username(Some("  "), "mario64@example.com"), "mario64");

    let derived = derive_username(Some(&"a".repeat(80)), "a@example.com");
    assert!(validate_username(&derived).is_ok());
  }

  #[test]
  fn candidates_add_numeric_suffixes() {
    let candidates: Vec<String> = username_candidates("ada").take(3).collect();
    assert_eq!(candidates, vec!["ada", "ada_2", "ada_3"]);
  }
}
