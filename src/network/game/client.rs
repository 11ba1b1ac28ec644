use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::Card;
use crate::engine::models::player::{Advisor, Role};
use crate::engine::state::{ControlChoice, Phase};
use crate::network::codec;
use crate::network::game::protocol::{self, GameOverReport, Snapshot};
use crate::network::session::{msg, Envelope};

/// Client-side mirror of a game session.
///
/// Thin and reactive: every snapshot from the server replaces the mirror
/// wholesale, so no speculative local state can survive contradiction by
/// server truth.
#[derive(Debug, Default)]
pub struct GameClient {
    role: Option<Role>,
    snapshot: Option<Snapshot>,
    game_over: Option<GameOverReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameClientEvent {
    RoleAssigned(Role),
    Synced,
    GameOver(GameOverReport),
}

impl GameClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_message(&mut self, bytes: &[u8]) -> Option<GameClientEvent> {
        let envelope = Envelope::from_bytes(bytes)?;
        match envelope.msg_type {
            msg::ROLE_ASSIGN => {
                let role = protocol::parse_role_assign(&envelope.data)?;
                self.role = Some(role);
                Some(GameClientEvent::RoleAssigned(role))
            }
            msg::STATE_SYNC => {
                let snapshot = protocol::parse_snapshot(&envelope.data)?;
                self.snapshot = Some(snapshot);
                Some(GameClientEvent::Synced)
            }
            msg::GAME_OVER => {
                let report = protocol::parse_game_over(&envelope.data)?;
                self.game_over = Some(report);
                Some(GameClientEvent::GameOver(report))
            }
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.snapshot.as_ref().map(|s| s.phase)
    }

    pub fn hand(&self) -> &[Option<Card>] {
        self.snapshot.as_ref().map(|s| s.hand.as_slice()).unwrap_or(&[])
    }

    pub fn game_over(&self) -> Option<&GameOverReport> {
        self.game_over.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
            || self
                .snapshot
                .as_ref()
                .is_some_and(|s| s.phase == Phase::GameOver)
    }

    // outbound intent builders

    pub fn reveal_request(card_index: usize) -> Vec<u8> {
        Envelope::new(msg::REVEAL, codec::reveal_to_wire(card_index)).to_bytes()
    }

    pub fn control_request(choice: &ControlChoice) -> Vec<u8> {
        Envelope::new(msg::CONTROL_CHOICE, codec::control_to_wire(choice)).to_bytes()
    }

    pub fn commit_request(advisor: Advisor, hex: CubeCoord, claim: Card) -> Vec<u8> {
        Envelope::new(msg::COMMIT_NOMINATION, codec::commit_to_wire(advisor, hex, claim)).to_bytes()
    }

    pub fn place_request(card_index: usize, hex: CubeCoord) -> Vec<u8> {
        Envelope::new(msg::PLACE_CARD, codec::place_to_wire(card_index, hex)).to_bytes()
    }
}
