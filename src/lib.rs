//! Authoritative rules core and network protocol for a three-player
//! hidden-information hex building game.
//!
//! A Mayor draws and places cards on a fog-covered hex map while two
//! Advisors nominate frontier tiles with claims that may or may not match
//! the tiles' hidden reality. The crate owns the game-rules state machine
//! (`engine`), its wire serialization, and the lobby/room protocol that
//! feeds players into a session (`network`). Transport is external: the
//! network layer is driven through an injected [`network::NetworkSender`]
//! and inbound message bytes, keyed by integer peer ids.

pub mod engine;
pub mod network;

pub use engine::{GameConfig, GameState};
pub use network::{GameServer, LobbyManager};
