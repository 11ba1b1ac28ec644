pub mod client;
pub mod manager;
pub mod protocol;

pub use client::{LobbyClient, LobbyClientEvent};
pub use manager::{LobbyError, LobbyManager, Room, ROOM_CODE_ALPHABET, ROOM_CODE_LEN};
pub use protocol::{GameStart, LobbyErrorMsg, RoomList, RoomSummary, RoomUpdate};
