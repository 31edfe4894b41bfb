//! Tile collision resolution
//!
//! An actor no larger than one cell covers at most four cells: the cell
//! under its anchor corner, plus neighbors in +x and +y when the anchor is
//! fractionally offset on that axis. Each overlapped solid cell is resolved
//! on the axis of least penetration: a shallow vertical overlap seats the
//! actor on top of the tile, a shallow horizontal overlap pushes it out
//! sideways.

use crate::map::TileMap;
use macroquad::prelude::*;

/// Result of resolving a hitbox against the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCollision {
    /// Corrected top-left position
    pub position: Vec2,
    /// A vertical resolution seated the actor on a tile
    pub landed: bool,
    /// A horizontal resolution moved the actor
    pub pushed: bool,
}

/// Cells covered by a box anchored at (x, y), in resolution order:
/// anchor cell, diagonal, +x neighbor, +y neighbor.
pub fn covered_cells(x: f32, y: f32, cell_size: f32) -> Vec<(i32, i32)> {
    let cell_x = x / cell_size;
    let cell_y = y / cell_size;
    let base_col = cell_x.floor() as i32;
    let base_row = cell_y.floor() as i32;
    let off_x = cell_x.fract() != 0.0;
    let off_y = cell_y.fract() != 0.0;

    let mut cells = vec![(base_col, base_row)];
    if off_x && off_y {
        cells.push((base_col + 1, base_row + 1));
    }
    if off_x {
        cells.push((base_col + 1, base_row));
    }
    if off_y {
        cells.push((base_col, base_row + 1));
    }
    cells
}

/// Covered cells that actually hold a tile.
pub fn solid_covered_cells(map: &TileMap, x: f32, y: f32) -> Vec<(i32, i32)> {
    covered_cells(x, y, map.cell_size)
        .into_iter()
        .filter(|&(col, row)| map.is_solid(col, row))
        .collect()
}

/// Separate a hitbox from every solid cell it overlaps.
pub fn resolve_tile_collision(map: &TileMap, hitbox: Rect) -> TileCollision {
    let mut hitbox = hitbox;
    let mut landed = false;
    let mut pushed = false;
    let cell_size = map.cell_size;

    for (col, row) in solid_covered_cells(map, hitbox.x, hitbox.y) {
        let cell_rect = Rect::new(
            col as f32 * cell_size,
            row as f32 * cell_size,
            cell_size,
            cell_size,
        );
        let overlap = match hitbox.intersect(cell_rect) {
            Some(r) => r,
            None => continue,
        };

        if overlap.h < overlap.w {
            // Axis of least penetration is vertical: seat on the tile
            hitbox.y = overlap.y - hitbox.h;
            landed = true;
        } else if overlap.w < overlap.h {
            if overlap.x == hitbox.x {
                // Overlap starts at our left edge: tile is on the left
                hitbox.x = overlap.x + overlap.w;
            } else if overlap.x > hitbox.x {
                hitbox.x = overlap.x - hitbox.w;
            }
            pushed = true;
        }
    }

    TileCollision {
        position: vec2(hitbox.x, hitbox.y),
        landed,
        pushed,
    }
}
