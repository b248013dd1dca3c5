pub mod account;
pub mod achievements;
pub mod admin;
pub mod ads;
pub mod categories;
pub mod chat;
pub mod content;
pub mod games;
pub mod index;
pub mod passwords;
pub mod points;
pub mod reviews;
pub mod rewards;
pub mod scores;
pub mod sessions;
pub mod users;
