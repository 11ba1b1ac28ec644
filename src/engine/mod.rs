pub mod bot;
pub mod constants;
pub mod deck;
pub mod grid;
pub mod models;
pub(crate) mod phases;
pub mod reality;
pub mod scoring;
pub mod state;

pub use bot::BotAgent;
pub use deck::CardPile;
pub use grid::CubeCoord;
pub use models::{Advisor, Card, Facilities, GameConfig, Nomination, Placement, Rank, Role, ScoreDelta, Scores, Suit, TurnRecord};
pub use reality::RealityMap;
pub use scoring::{distance, score_placement, winning_nomination};
pub use state::{ControlChoice, GameError, GameState, Intent, Phase, RejectStats, SubPhase};
