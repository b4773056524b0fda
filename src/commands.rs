//! Commands sent from the game's widgets to the game service. Sending is fire
//! and forget, nothing is awaited.

use crate::game::composter::ComposterName;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "type")]
pub enum Command {
    #[serde(rename = "composter.started", rename_all = "camelCase")]
    ComposterStarted {
        building_id: String,
        building: ComposterName,
    },
    #[serde(rename = "compost.collected", rename_all = "camelCase")]
    CompostCollected {
        building_id: String,
        building: ComposterName,
    },
    /// Ask the game service to persist the current state.
    #[serde(rename = "SAVE")]
    Save,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ComposterStarted { .. } => "composter.started",
            Command::CompostCollected { .. } => "compost.collected",
            Command::Save => "SAVE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommandBus {
    sender: UnboundedSender<Command>,
}

impl CommandBus {
    /// Create a bus along with the receiving end the game service reads from.
    pub fn new() -> (Self, UnboundedReceiver<Command>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, command: Command) {
        debug!(command = command.name(), "sending command");
        if let Err(err) = self.sender.send(command) {
            warn!(command = err.0.name(), "the game service is gone, dropping command");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_json() {
        let started = Command::ComposterStarted {
            building_id: "123".into(),
            building: ComposterName::CompostBin,
        };
        assert_eq!(
            serde_json::to_string(&started).expect("Failed to serialize"),
            r#"{"type":"composter.started","buildingId":"123","building":"Compost Bin"}"#
        );

        let collected: Command = serde_json::from_str(
            r#"{"type":"compost.collected","buildingId":"9","building":"Turbo Composter"}"#,
        )
        .expect("Failed to parse");
        assert_eq!(
            collected,
            Command::CompostCollected {
                building_id: "9".into(),
                building: ComposterName::TurboComposter,
            }
        );

        assert_eq!(
            serde_json::to_string(&Command::Save).expect("Failed to serialize"),
            r#"{"type":"SAVE"}"#
        );
    }

    #[test]
    fn test_bus_delivers_in_order() {
        let (bus, mut receiver) = CommandBus::new();
        bus.send(Command::Save);
        bus.clone().send(Command::ComposterStarted {
            building_id: "1".into(),
            building: ComposterName::PremiumComposter,
        });

        assert_eq!(receiver.try_recv().ok(), Some(Command::Save));
        assert_eq!(receiver.try_recv().ok().map(|c| c.name()), Some("composter.started"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_send_without_receiver() {
        let (bus, receiver) = CommandBus::new();
        drop(receiver);
        // Sending to a closed bus is not an error for the sender.
        bus.send(Command::Save);
    }
}
