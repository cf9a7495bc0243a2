use crate::api::Obstacle;
use crate::error::{Result, check_size};
use crate::types::Rectangle;

/// Static rectangular obstacle.
///
/// A passable block is a one-way platform: movers rise through it from below
/// and walk through it sideways, but land on its top edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    passable: bool,
}

impl Block {
    /// # Panics
    /// If `w` or `h` is not strictly positive and finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64, passable: bool) -> Self {
        Self::try_new(x, y, w, h, passable).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(x: f64, y: f64, w: f64, h: f64, passable: bool) -> Result<Self> {
        check_size(w, h)?;
        Ok(Self { x, y, w, h, passable })
    }

    /// Same block moved to a new top-left corner (moving platforms).
    pub fn at(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }
}

impl Obstacle for Block {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn w(&self) -> f64 {
        self.w
    }
    fn h(&self) -> f64 {
        self.h
    }
    fn passable(&self) -> bool {
        self.passable
    }
}

impl From<Block> for Rectangle {
    fn from(b: Block) -> Self {
        b.bounds()
    }
}
