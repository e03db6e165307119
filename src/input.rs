//! Player commands
//!
//! Keyboard handling lives outside the simulation; front-ends translate keys
//! into [`Command`]s and hand them to the tick. Commands are dropped while the
//! skier is down.

use serde::{Deserialize, Serialize};

use crate::sim::Skier;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Steer one step left
    TurnLeft,
    /// Steer one step right
    TurnRight,
    /// Face straight downhill immediately
    Forward,
    ToggleTurbo,
}

impl Command {
    /// Classic key bindings; anything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Command::TurnLeft),
            "d" | "D" | "ArrowRight" => Some(Command::TurnRight),
            "s" | "S" | "ArrowDown" => Some(Command::Forward),
            "f" | "F" => Some(Command::ToggleTurbo),
            _ => None,
        }
    }

    /// Apply to the skier. Returns `false` if the skier could not take input.
    pub fn apply(self, skier: &mut Skier, tuning: &Tuning) -> bool {
        if !skier.accepts_input() {
            return false;
        }
        match self {
            Command::TurnLeft => skier.change_direction(-1),
            Command::TurnRight => skier.change_direction(1),
            Command::Forward => skier.face_forward(tuning),
            Command::ToggleTurbo => skier.toggle_turbo(),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FORWARD, MAX_DIR};

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key("a"), Some(Command::TurnLeft));
        assert_eq!(Command::from_key("d"), Some(Command::TurnRight));
        assert_eq!(Command::from_key("s"), Some(Command::Forward));
        assert_eq!(Command::from_key("f"), Some(Command::ToggleTurbo));
        assert_eq!(Command::from_key("q"), None);
        assert_eq!(Command::from_key(""), None);
    }

    #[test]
    fn test_apply_while_upright() {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        assert!(Command::TurnRight.apply(&mut skier, &tuning));
        assert_eq!(skier.direction, MAX_DIR);
        assert!(Command::Forward.apply(&mut skier, &tuning));
        assert_eq!(skier.direction, FORWARD);
        assert_eq!(skier.angle, 270.0);
        assert!(Command::ToggleTurbo.apply(&mut skier, &tuning));
        assert!(skier.turbo);
    }

    #[test]
    fn test_ignored_while_falling() {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        skier.collide(1);
        let direction = skier.direction;
        assert!(!Command::TurnLeft.apply(&mut skier, &tuning));
        assert!(!Command::ToggleTurbo.apply(&mut skier, &tuning));
        assert_eq!(skier.direction, direction);
        assert!(!skier.turbo);
    }
}
