//! Decode command - unpack a packed tile id.

use std::fmt;

use serde::Serialize;
use tilepath::coord::PackedTileId;

use crate::error::CliError;

/// Fields of a packed tile id.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Decoded {
    pub id: PackedTileId,
    pub col: u32,
    pub row: u32,
    pub zoom: u8,
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col={} row={} zoom={}", self.col, self.row, self.zoom)
    }
}

/// Parse and unpack `id`.
pub fn run(id: &str) -> Result<Decoded, CliError> {
    let id: PackedTileId = id.parse()?;
    Ok(Decoded {
        id,
        col: id.column(),
        row: id.row(),
        zoom: id.zoom(),
    })
}
