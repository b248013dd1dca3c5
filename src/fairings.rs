mod cron;
mod sentry;

pub use self::cron::CronFairing;
pub use self::sentry::SentryFairing;
