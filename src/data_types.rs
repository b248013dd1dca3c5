mod achievement_criteria;
mod ad_event;
mod ad_placement;
mod email_status;
mod game_source;
mod reward_kind;

pub use achievement_criteria::AchievementCriteria;
pub use ad_event::AdEvent;
pub use ad_placement::AdPlacement;
pub use email_status::EmailStatus;
pub use game_source::GameSource;
pub use reward_kind::RewardKind;
