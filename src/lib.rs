#[macro_use]
extern crate rocket;

use lazy_static::lazy_static;

pub mod achievements;
pub mod ads;
pub mod auth;
pub mod aws;
pub mod chat;
pub mod config;
pub mod data_types;
pub mod db;
pub mod emails;
pub mod fairings;
pub mod guards;
pub mod leaderboard;
pub mod ledger;
pub mod models;
pub mod oidc;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod schema;
pub mod views;

pub const DEBUG_PROFILE: &str = "debug";
pub const TEST_PROFILE: &str = "test";

lazy_static! {
  pub static ref PROFILE: String =
    std::env::var("ROCKET_PROFILE").unwrap_or_else(|_| DEBUG_PROFILE.to_string());
}
