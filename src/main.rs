#[macro_use]
extern crate rocket;

use arcadia_api::config::Config;
use arcadia_api::db::{run_migrations, DbConn};
use arcadia_api::fairings::{CronFairing, SentryFairing};
use arcadia_api::oidc::OidcCache;
use arcadia_api::routes::{self, admin};
use rocket::fairing::AdHoc;
use rocket::figment::providers::Env;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;

#[launch]
fn rocket() -> Rocket<Build> {
  dotenv::dotenv().ok();

  let mut figment = rocket::Config::figment();

  if let Some(database_url) = Env::var("DATABASE_URL") {
    figment = figment.merge(("databases.default.url", database_url));
  }

  let sentry_dsn = figment.extract_inner::<String>("sentry_dsn").ok();

  rocket::custom(figment)
    .attach(SentryFairing::fairing(sentry_dsn))
    .attach(DbConn::fairing())
    .attach(AdHoc::on_ignite("Run Migrations", run_migrations))
    .attach(AdHoc::config::<Config>())
    .attach(CronFairing::fairing())
    .manage(OidcCache::default())
    .mount(
      "/",
      openapi_get_routes![
        routes::index::get_health,
        routes::users::create,
        routes::sessions::create,
        routes::sessions::create_google,
        routes::passwords::create,
        routes::passwords::update,
        routes::account::get,
        routes::account::update,
        routes::account::unsubscribe,
        routes::categories::list,
        routes::games::list,
        routes::games::popular,
        routes::games::get,
        routes::games::create_play,
        routes::scores::create,
        routes::scores::get_leaderboard,
        routes::scores::list_mine,
        routes::reviews::upsert,
        routes::reviews::list,
        routes::reviews::delete,
        routes::chat::list,
        routes::chat::create,
        routes::achievements::list,
        routes::achievements::list_mine,
        routes::rewards::list,
        routes::rewards::purchase,
        routes::rewards::list_mine,
        routes::rewards::equip,
        routes::points::get,
        routes::ads::get,
        routes::ads::create_impression,
        routes::ads::create_click,
        routes::content::list,
        routes::content::get,
        admin::games::list,
        admin::games::create,
        admin::games::update,
        admin::games::delete,
        admin::games::create_thumbnail,
        admin::categories::create,
        admin::categories::update,
        admin::categories::delete,
        admin::achievements::list,
        admin::achievements::create,
        admin::achievements::update,
        admin::achievements::delete,
        admin::rewards::list,
        admin::rewards::create,
        admin::rewards::update,
        admin::rewards::delete,
        admin::ads::list,
        admin::ads::create,
        admin::ads::update,
        admin::ads::delete,
        admin::ads::analytics,
        admin::content::upsert,
        admin::content::delete,
        admin::users::list,
        admin::users::update_admin,
        admin::users::adjust_points,
        admin::email_logs::list,
        admin::chat::delete,
      ],
    )
}
