pub mod achievements;
pub mod ads;
pub mod categories;
pub mod chat;
pub mod content;
pub mod email_logs;
pub mod games;
pub mod rewards;
pub mod users;
