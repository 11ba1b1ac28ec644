pub mod cards;
pub mod config;
pub mod player;
pub mod records;

pub use cards::{Card, Rank, Suit};
pub use config::GameConfig;
pub use player::{Advisor, Role};
pub use records::{Facilities, Nomination, Placement, ScoreDelta, Scores, TurnRecord};
