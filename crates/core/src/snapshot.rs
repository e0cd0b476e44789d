use std::fmt;

use serde::Serialize;

use crate::types::{GemKind, Position};

/// Plain copy of the board, detached from piece identity.
///
/// `cells` is row-major; `0` is an empty slot and `kind.index() + 1` an
/// occupied one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GridSnapshot {
    pub rows: u8,
    pub columns: u8,
    pub generation: u32,
    pub cells: Vec<u8>,
}

impl GridSnapshot {
    pub fn new(rows: u8, columns: u8, generation: u32, cells: Vec<u8>) -> Self {
        Self {
            rows,
            columns,
            generation,
            cells,
        }
    }

    pub fn kind_at(&self, pos: Position) -> Option<GemKind> {
        if pos.row < 0 || pos.col < 0 || pos.row as u8 >= self.rows || pos.col as u8 >= self.columns {
            return None;
        }
        let code = self.cells[pos.row as usize * self.columns as usize + pos.col as usize];
        code.checked_sub(1).and_then(GemKind::from_index)
    }
}

/// One line per row, kind indices separated by spaces, `.` for empty slots.
impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.columns.max(1) as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, code) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match code.checked_sub(1) {
                    Some(kind) => write!(f, "{}", kind)?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
