mod achievement;
mod ad_analytics_event;
mod advertisement;
mod chat_message;
mod email_log;
mod game;
mod game_category;
mod game_play;
mod game_review;
mod game_score;
mod one_time_token;
mod point_transaction;
mod reward;
mod user;
mod user_achievement;
mod user_points;
mod user_reward;
mod website_content;

pub use achievement::{Achievement, AchievementChangeset};
pub use ad_analytics_event::{AdAnalyticsEvent, AdAnalyticsEventChangeset};
pub use advertisement::{Advertisement, AdvertisementChangeset};
pub use chat_message::{ChatMessage, ChatMessageChangeset};
pub use email_log::{EmailLog, EmailLogChangeset};
pub use game::{Game, GameChangeset, GameFilter};
pub use game_category::{GameCategory, GameCategoryChangeset};
pub use game_play::{GamePlay, GamePlayChangeset};
pub use game_review::{GameReview, GameReviewChangeset};
pub use game_score::{GameScore, GameScoreChangeset};
pub use one_time_token::{OneTimeToken, OneTimeTokenChangeset, RESET_PASSWORD_SCOPE};
pub use point_transaction::{PointTransaction, PointTransactionChangeset};
pub use reward::{Reward, RewardChangeset};
pub use user::{normalize_email, User, UserChangeset};
pub use user_achievement::{UserAchievement, UserAchievementChangeset};
pub use user_points::UserPoints;
pub use user_reward::{UserReward, UserRewardChangeset};
pub use website_content::{WebsiteContent, WebsiteContentChangeset};
