use serde::{Deserialize, Serialize};
use std::fmt;

/// 手番側 (White = light, Black = dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Default for Side {
    fn default() -> Self {
        Side::White
    }
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Row direction a pawn of this side advances in (rows count down from rank 8).
    pub fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 盤面座標 (0-indexed)
///
/// `x` is the file (a = 0), `y` is the row counted from the top of the
/// diagram (rank 8 = 0). `index()` therefore walks the board a8, b8 ... h1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    pub fn new(x: usize, y: usize) -> Self {
        Square { x, y }
    }

    pub fn from_index(idx: usize) -> Self {
        Square {
            x: idx % 8,
            y: idx / 8,
        }
    }

    pub fn index(self) -> usize {
        self.y * 8 + self.x
    }

    /// Chess rank, 1..=8.
    pub fn rank(self) -> usize {
        8 - self.y
    }

    pub fn offset(self, dx: i32, dy: i32) -> Option<Square> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Some(Square::new(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn is_light(self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Parses algebraic notation such as `e4`.
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let x = file as usize - 'a' as usize;
        let r = rank as usize - '0' as usize;
        Some(Square::new(x, 8 - r))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = (b'a' + self.x as u8) as char;
        write!(f, "{}{}", file, self.rank())
    }
}

/// キャスリング権 (片側分)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub king_side: bool,
    pub queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        king_side: false,
        queen_side: false,
    };

    pub const BOTH: CastlingRights = CastlingRights {
        king_side: true,
        queen_side: true,
    };

    pub fn any(self) -> bool {
        self.king_side || self.queen_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_notation() {
        let e4 = Square::parse("e4").unwrap();
        assert_eq!(e4, Square::new(4, 4));
        assert_eq!(e4.index(), 36);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::from_index(0).to_string(), "a8");
        assert_eq!(Square::from_index(63).to_string(), "h1");
        assert!(Square::parse("i1").is_none());
        assert!(Square::parse("a9").is_none());
        assert!(Square::parse("a10").is_none());
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let a1 = Square::parse("a1").unwrap();
        assert_eq!(a1.offset(0, -1), Square::parse("a2"));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, 1), None);
    }
}
