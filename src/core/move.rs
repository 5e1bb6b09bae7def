use super::error::RulesError;
use super::piece::PieceKind;
use super::types::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 指し手
///
/// `promotion: None` on a pawn reaching the last rank is read as a queen
/// promotion when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.promotion {
            Some(kind) => write!(f, "{}{}{}", self.from, self.to, kind.letter()),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

impl FromStr for Move {
    type Err = RulesError;

    /// Parses long algebraic (UCI) text: `e2e4`, `e7e8q`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RulesError::InvalidMoveText(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(bad());
        }
        let from = Square::parse(&s[0..2]).ok_or_else(bad)?;
        let to = Square::parse(&s[2..4]).ok_or_else(bad)?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(bad()),
            },
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}
