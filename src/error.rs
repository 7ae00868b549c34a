use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tile coordinate {z}/{x}/{y} is out of range")]
    InvalidTile { z: u8, x: u32, y: u32 },
    #[error("Inconsistent segment data: {0}")]
    InvalidSegment(String),
}
