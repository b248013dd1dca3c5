use serde::{Deserialize, Serialize};

fn default_session_ttl_hours() -> i64 {
  24 * 7
}

fn default_starting_points() -> i64 {
  100
}

fn default_leaderboard_size() -> i64 {
  10
}

fn default_chat_history_limit() -> i64 {
  50
}

fn default_chat_retention_days() -> i64 {
  30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
  pub auth_client_secret: String,
  pub host: String,
  pub web_host: String,
  #[serde(default = "default_session_ttl_hours")]
  pub session_ttl_hours: i64,
  pub google_client_id: Option<String>,
  pub aws_access_key_id: String,
  pub aws_secret_key: String,
  pub s3_bucket: String,
  pub email_from: String,
  pub unsubscribe_secret: String,
  pub sentry_dsn: Option<String>,
  #[serde(default = "default_starting_points")]
  pub starting_points: i64,
  #[serde(default = "default_leaderboard_size")]
  pub leaderboard_size: i64,
  #[serde(default = "default_chat_history_limit")]
  pub chat_history_limit: i64,
  #[serde(default = "default_chat_retention_days")]
  pub chat_retention_days: i64,
}

impl Config {
  pub fn s3_public_url(&self, key: &str) -> String {
    format!("https://{}.s3.eu-west-2.amazonaws.com/{}", self.s3_bucket, key)
  }
}

#[cfg(test)]
pub fn test_config() -> Config {
  Config {
    auth_client_secret: "test secret".to_string(),
    host: "http://localhost:8000".to_string(),
    web_host: "http://localhost:3000".to_string(),
    session_ttl_hours: default_session_ttl_hours(),
    google_client_id: None,
    aws_access_key_id: "AKIATEST".to_string(),
    aws_secret_key: "secret".to_string(),
    s3_bucket: "arcadia-test".to_string(),
    email_from: "Arcadia <noreply@arcadia.test>".to_string(),
    unsubscribe_secret: "unsubscribe secret".to_string(),
    sentry_dsn: None,
    starting_points: default_starting_points(),
    leaderboard_size: default_leaderboard_size(),
    chat_history_limit: default_chat_history_limit(),
    chat_retention_days: default_chat_retention_days(),
  }
}
