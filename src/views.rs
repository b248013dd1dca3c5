mod achievement;
mod advertisement;
mod category;
mod chat_message;
mod content;
mod email_log;
mod game;
mod points;
mod rating;
mod review;
mod reward;
mod score;
mod user;

pub use achievement::{AchievementView, EarnedAchievementView};
pub use advertisement::{AdAnalyticsView, AdView, AdvertisementView};
pub use category::CategoryView;
pub use chat_message::ChatMessageView;
pub use content::ContentView;
pub use email_log::EmailLogView;
pub use game::{GameDetailView, GameView, PlayView, ThumbnailUploadView};
pub use points::{PointTransactionView, PointsHistoryView, PointsView};
pub use rating::RatingSummary;
pub use review::ReviewView;
pub use reward::{OwnedRewardView, PurchaseView, RewardView};
pub use score::{BestScoreView, LeaderboardEntryView, LeaderboardView, ScoreSubmissionView, ScoreView};
pub use user::{PublicUserView, SessionView, UserView};
