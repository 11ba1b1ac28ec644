pub mod codec;
pub mod game;
pub mod lobby;
pub mod session;

pub use game::{GameClient, GameClientEvent, GameServer, Seat};
pub use lobby::{GameStart, LobbyClient, LobbyClientEvent, LobbyError, LobbyManager};
pub use session::{Envelope, MemorySender, NetworkSender, PeerId};
