//! JSON shapes printed with `--json`.

use serde::Serialize;
use union_core::MoveStep;

/// Legal moves for the side to move.
#[derive(Debug, Serialize)]
pub struct MovesJson {
    pub position: String,
    pub side: String,
    pub moves: Vec<String>,
}

/// One piece transfer.
#[derive(Debug, Serialize)]
pub struct StepJson {
    pub piece: String,
    pub from: String,
    pub to: String,
    /// Occupant of `to` after the transfer.
    pub result: String,
}

impl From<&MoveStep> for StepJson {
    fn from(step: &MoveStep) -> Self {
        StepJson {
            piece: step.piece.to_string(),
            from: step.from.to_algebraic(),
            to: step.to.to_algebraic(),
            result: step.result.to_string(),
        }
    }
}

/// One move played with `play`.
#[derive(Debug, Serialize)]
pub struct PlayedJson {
    #[serde(rename = "move")]
    pub mov: String,
    pub steps: Vec<StepJson>,
}

/// Result of `play`.
#[derive(Debug, Serialize)]
pub struct PlayJson {
    pub moves: Vec<PlayedJson>,
    pub position: String,
}

/// Result of `perft`.
#[derive(Debug, Serialize)]
pub struct PerftJson {
    pub depth: u32,
    pub nodes: u64,
    pub divide: Vec<DivideJson>,
}

#[derive(Debug, Serialize)]
pub struct DivideJson {
    #[serde(rename = "move")]
    pub mov: String,
    pub nodes: u64,
}
