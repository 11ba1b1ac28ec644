pub mod client;
pub mod protocol;
pub mod server;

pub use client::{GameClient, GameClientEvent};
pub use protocol::{GameOverReport, Snapshot};
pub use server::{assign_seats, GameServer, Seat};
