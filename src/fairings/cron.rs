use crate::config::Config;
use crate::guards::DbConn;
use crate::models::{Advertisement, ChatMessage};
use chrono::{Duration, Utc};
use clokwerk::{AsyncScheduler, Job, TimeUnits};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{tokio, Orbit, Rocket};
use std::sync::Arc;

#[derive(Clone)]
pub struct CronFairing;

impl CronFairing {
  pub fn fairing() -> impl Fairing {
    Self
  }

  async fn init(&self, rocket: &Rocket<Orbit>) {
    let config = match rocket.state::<Config>() {
      Some(config) => config.clone(),
      None => {
        log::error!("cron not started: missing config");
        return;
      }
    };

    let db_conn = match DbConn::get_one(rocket).await {
      Some(db_conn) => Arc::new(db_conn),
      None => {
        log::error!("cron not started: no database connection");
        return;
      }
    };

    let retention_days = config.chat_retention_days;
    let mut scheduler = AsyncScheduler::new();

    let ads_conn = Arc::clone(&db_conn);
    scheduler.every(1.hour()).run(move || {
      let db_conn = Arc::clone(&ads_conn);
      async move { expire_ads(&db_conn).await }
    });

    let chat_conn = Arc::clone(&db_conn);
    scheduler.every(1.day()).at("03:00").run(move || {
      let db_conn = Arc::clone(&chat_conn);
      async move { prune_chat(&db_conn, retention_days).await }
    });

    tokio::spawn(async move {
      loop {
        scheduler.run_pending().await;
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
      }
    });
  }
}

async fn expire_ads(db_conn: &DbConn) {
  let now = Utc::now().naive_utc();

  match db_conn
    .run(move |conn| Advertisement::deactivate_expired(now, conn))
    .await
  {
    Ok(0) => {}
    Ok(count) => log::info!("deactivated {} expired advertisements", count),
    Err(error) => log::error!("failed to deactivate expired advertisements: {}", error),
  }
}

async fn prune_chat(db_conn: &DbConn, retention_days: i64) {
  let cutoff = Utc::now().naive_utc() - Duration::days(retention_days);

  match db_conn
    .run(move |conn| ChatMessage::delete_older_than(cutoff, conn))
    .await
  {
    Ok(count) => log::info!("deleted {} chat messages older than {}", count, cutoff),
    Err(error) => log::error!("failed to prune chat messages: {}", error),
  }
}

#[rocket::async_trait]
impl Fairing for CronFairing {
  fn info(&self) -> Info {
    Info {
      name: "cron",
      kind: Kind::Liftoff,
    }
  }

  async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
    self.init(rocket).await;
  }
}
