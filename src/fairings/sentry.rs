use rocket::fairing::{self, Fairing, Info, Kind};
use rocket::{Build, Rocket};
use sentry::ClientInitGuard;
use std::sync::Mutex;

pub struct SentryFairing {
  dsn: Option<String>,
  guard: Mutex<Option<ClientInitGuard>>,
}

impl SentryFairing {
  pub fn fairing(dsn: Option<String>) -> impl Fairing {
    Self {
      dsn,
      guard: Mutex::new(None),
    }
  }

  fn init(&self) {
    let dsn = match self.dsn.as_deref() {
      Some(dsn) if !dsn.is_empty() => dsn,
      _ => {
        log::info!("sentry disabled, no dsn configured");
        return;
      }
    };

    let guard = sentry::init((
      dsn,
      sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: Some(crate::PROFILE.clone().into()),
        ..Default::default()
      },
    ));

    if let Ok(mut slot) = self.guard.lock() {
      *slot = Some(guard);
    }
  }
}

#[rocket::async_trait]
impl Fairing for SentryFairing {
  fn info(&self) -> Info {
    Info {
      name: "sentry",
      kind: Kind::Ignite,
    }
  }

  async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
    self.init();
    Ok(rocket)
  }
}
