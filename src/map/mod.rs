//! Level data
//!
//! Two flavors of level file, both RON under `assets/maps/`:
//! - `TileMap`: a character grid of solid cells plus placed objects,
//!   used by the platformer.
//! - `Layout`: free-floating slabs and discs that become rigid bodies,
//!   used by the slingshot game.
//!
//! Loading and validation live in [`load`].

pub mod load;

pub use load::{load_layout, load_tile_map, MapError};

use macroquad::prelude::Vec2;
use serde::{Deserialize, Serialize};

/// Grid character marking a solid cell
pub const SOLID: u8 = b'#';
/// Grid character marking an empty cell
pub const EMPTY: u8 = b'.';

/// An object placed on a tile map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapObject {
    /// Where the player spawns (top-left of the hitbox)
    PlayerStart { x: f32, y: f32 },
    /// A collectible gem (top-left of its cell)
    Gem { x: f32, y: f32 },
}

/// A tile grid with placed objects.
///
/// Rows are strings of `#` and `.`; row 0 is the top of the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub cell_size: f32,
    pub rows: Vec<String>,
    pub objects: Vec<MapObject>,
}

impl TileMap {
    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel_width(&self) -> f32 {
        self.width() as f32 * self.cell_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.height() as f32 * self.cell_size
    }

    /// Is the cell at (col, row) solid? Cells outside the grid are empty,
    /// like asking a tile layer for a cell it never had.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        let (col, row) = (col as usize, row as usize);
        self.rows
            .get(row)
            .map(|r| r.as_bytes().get(col) == Some(&SOLID))
            .unwrap_or(false)
    }

    /// The single player spawn position.
    pub fn player_start(&self) -> Option<Vec2> {
        self.objects.iter().find_map(|obj| match obj {
            MapObject::PlayerStart { x, y } => Some(Vec2::new(*x, *y)),
            _ => None,
        })
    }

    /// All gem positions in file order.
    pub fn gems(&self) -> Vec<Vec2> {
        self.objects
            .iter()
            .filter_map(|obj| match obj {
                MapObject::Gem { x, y } => Some(Vec2::new(*x, *y)),
                _ => None,
            })
            .collect()
    }
}

/// An axis-aligned box in pixel space, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Slab {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w * 0.5, self.h * 0.5)
    }
}

/// A circle in pixel space, center anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// A physics scene description for the slingshot game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Static ground the rest lands on
    pub floors: Vec<Slab>,
    /// Dynamic planks that can be knocked over
    pub planks: Vec<Slab>,
    /// Dynamic targets the player knocks out
    pub targets: Vec<Disc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_map() -> TileMap {
        TileMap {
            cell_size: 16.0,
            rows: vec!["....".into(), ".#..".into(), "####".into()],
            objects: vec![
                MapObject::PlayerStart { x: 0.0, y: 0.0 },
                MapObject::Gem { x: 32.0, y: 0.0 },
                MapObject::Gem { x: 48.0, y: 16.0 },
            ],
        }
    }

    #[test]
    fn test_dimensions() {
        let map = tiny_map();
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 3);
        assert_eq!(map.pixel_width(), 64.0);
        assert_eq!(map.pixel_height(), 48.0);
    }

    #[test]
    fn test_solid_lookup() {
        let map = tiny_map();
        assert!(map.is_solid(1, 1));
        assert!(!map.is_solid(0, 0));
        assert!(map.is_solid(3, 2));
        // Outside the grid is empty in every direction
        assert!(!map.is_solid(-1, 0));
        assert!(!map.is_solid(0, -1));
        assert!(!map.is_solid(4, 0));
        assert!(!map.is_solid(0, 3));
    }

    #[test]
    fn test_object_accessors() {
        let map = tiny_map();
        assert_eq!(map.player_start(), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(map.gems().len(), 2);
    }

    #[test]
    fn test_slab_geometry() {
        let flat = Slab { x: 0.0, y: 0.0, w: 96.0, h: 16.0 };
        let tall = Slab { x: 0.0, y: 0.0, w: 16.0, h: 96.0 };
        assert_eq!(flat.center(), Vec2::new(48.0, 8.0));
        assert_eq!(tall.half_extents(), Vec2::new(8.0, 48.0));
    }
}
