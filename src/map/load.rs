//! Map loading and validation
//!
//! Files come through the engine's async file API so the same code path
//! works from a bundle or a directory tree. Parsed data is validated
//! against hard limits before the games see it; a file that fails any
//! check is rejected whole.

use super::{Layout, MapObject, Slab, TileMap, EMPTY, SOLID};
use macroquad::file::load_string;

/// Validation limits to keep a bad file from exhausting anything
pub mod limits {
    /// Maximum grid dimension (width or height) in cells
    pub const MAX_GRID: usize = 256;
    /// Maximum objects on a tile map, and bodies per layout kind
    pub const MAX_OBJECTS: usize = 1024;
    /// Maximum coordinate magnitude in pixels
    pub const MAX_COORD: f32 = 100_000.0;
    /// Allowed cell size range in pixels
    pub const CELL_RANGE: (f32, f32) = (4.0, 128.0);
}

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    FileError(macroquad::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<macroquad::Error> for MapError {
    fn from(e: macroquad::Error) -> Self {
        MapError::FileError(e)
    }
}

impl From<ron::error::SpannedError> for MapError {
    fn from(e: ron::error::SpannedError) -> Self {
        MapError::ParseError(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::FileError(e) => write!(f, "File error: {}", e),
            MapError::ParseError(e) => write!(f, "Parse error: {}", e),
            MapError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for MapError {}

fn is_valid_coord(v: f32) -> bool {
    v.is_finite() && v.abs() <= limits::MAX_COORD
}

/// Parse and validate a tile map from RON text.
pub fn tile_map_from_str(text: &str) -> Result<TileMap, MapError> {
    let map: TileMap = ron::from_str(text)?;
    validate_tile_map(&map).map_err(MapError::ValidationError)?;
    Ok(map)
}

/// Parse and validate a slingshot layout from RON text.
pub fn layout_from_str(text: &str) -> Result<Layout, MapError> {
    let layout: Layout = ron::from_str(text)?;
    validate_layout(&layout).map_err(MapError::ValidationError)?;
    Ok(layout)
}

/// Load a tile map through the engine's file API.
pub async fn load_tile_map(path: &str) -> Result<TileMap, MapError> {
    let text = load_string(path).await?;
    tile_map_from_str(&text)
}

/// Load a slingshot layout through the engine's file API.
pub async fn load_layout(path: &str) -> Result<Layout, MapError> {
    let text = load_string(path).await?;
    layout_from_str(&text)
}

fn validate_tile_map(map: &TileMap) -> Result<(), String> {
    let (cell_min, cell_max) = limits::CELL_RANGE;
    if !map.cell_size.is_finite() || map.cell_size < cell_min || map.cell_size > cell_max {
        return Err(format!("cell_size {} outside {}..{}", map.cell_size, cell_min, cell_max));
    }

    let height = map.rows.len();
    if height == 0 || height > limits::MAX_GRID {
        return Err(format!("grid height {} outside 1..{}", height, limits::MAX_GRID));
    }
    let width = map.rows[0].len();
    if width == 0 || width > limits::MAX_GRID {
        return Err(format!("grid width {} outside 1..{}", width, limits::MAX_GRID));
    }

    for (i, row) in map.rows.iter().enumerate() {
        if row.len() != width {
            return Err(format!("row {} has width {}, expected {}", i, row.len(), width));
        }
        if let Some(c) = row.bytes().find(|&c| c != SOLID && c != EMPTY) {
            return Err(format!("row {} contains invalid cell character {:?}", i, c as char));
        }
    }

    if map.objects.len() > limits::MAX_OBJECTS {
        return Err(format!("too many objects ({} > {})", map.objects.len(), limits::MAX_OBJECTS));
    }

    let mut starts = 0;
    for (i, obj) in map.objects.iter().enumerate() {
        let (x, y) = match obj {
            MapObject::PlayerStart { x, y } => {
                starts += 1;
                (*x, *y)
            }
            MapObject::Gem { x, y } => (*x, *y),
        };
        if !is_valid_coord(x) || !is_valid_coord(y) {
            return Err(format!("object {} has invalid position ({}, {})", i, x, y));
        }
        if x < 0.0 || x >= map.pixel_width() || y < 0.0 || y >= map.pixel_height() {
            return Err(format!("object {} lies outside the map at ({}, {})", i, x, y));
        }
    }
    if starts != 1 {
        return Err(format!("expected exactly one PlayerStart, found {}", starts));
    }

    Ok(())
}

fn validate_slab(slab: &Slab, context: &str) -> Result<(), String> {
    for v in [slab.x, slab.y, slab.w, slab.h] {
        if !is_valid_coord(v) {
            return Err(format!("{}: invalid value {}", context, v));
        }
    }
    if slab.w <= 0.0 || slab.h <= 0.0 {
        return Err(format!("{}: non-positive size {}x{}", context, slab.w, slab.h));
    }
    Ok(())
}

fn validate_layout(layout: &Layout) -> Result<(), String> {
    for (name, count) in [
        ("floors", layout.floors.len()),
        ("planks", layout.planks.len()),
        ("targets", layout.targets.len()),
    ] {
        if count > limits::MAX_OBJECTS {
            return Err(format!("too many {} ({} > {})", name, count, limits::MAX_OBJECTS));
        }
    }
    if layout.floors.is_empty() {
        return Err("layout has no floor".to_string());
    }
    if layout.targets.is_empty() {
        return Err("layout has no targets".to_string());
    }

    for (i, slab) in layout.floors.iter().enumerate() {
        validate_slab(slab, &format!("floor {}", i))?;
    }
    for (i, slab) in layout.planks.iter().enumerate() {
        validate_slab(slab, &format!("plank {}", i))?;
    }
    for (i, disc) in layout.targets.iter().enumerate() {
        if !is_valid_coord(disc.x) || !is_valid_coord(disc.y) {
            return Err(format!("target {}: invalid position ({}, {})", i, disc.x, disc.y));
        }
        if !disc.radius.is_finite() || disc.radius <= 0.0 || disc.radius > limits::MAX_COORD {
            return Err(format!("target {}: invalid radius {}", i, disc.radius));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_MAP: &str = r#####"(
        cell_size: 16.0,
        rows: [
            "....",
            ".#..",
            "####",
        ],
        objects: [
            PlayerStart(x: 0.0, y: 0.0),
            Gem(x: 48.0, y: 16.0),
        ],
    )"#####;

    #[test]
    fn test_valid_map_parses() {
        let map = tile_map_from_str(VALID_MAP).unwrap();
        assert_eq!(map.width(), 4);
        assert_eq!(map.gems().len(), 1);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let text = r#"(
            cell_size: 16.0,
            rows: ["....", "..", "...."],
            objects: [PlayerStart(x: 0.0, y: 0.0)],
        )"#;
        assert!(matches!(
            tile_map_from_str(text),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bad_cell_character_rejected() {
        let text = r#"(
            cell_size: 16.0,
            rows: ["..x.", "....", "...."],
            objects: [PlayerStart(x: 0.0, y: 0.0)],
        )"#;
        assert!(matches!(
            tile_map_from_str(text),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_player_start_rejected() {
        let text = r#####"(
            cell_size: 16.0,
            rows: ["....", "####"],
            objects: [],
        )"#####;
        assert!(matches!(
            tile_map_from_str(text),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_object_outside_map_rejected() {
        let text = r#####"(
            cell_size: 16.0,
            rows: ["....", "####"],
            objects: [PlayerStart(x: 0.0, y: 0.0), Gem(x: 500.0, y: 0.0)],
        )"#####;
        assert!(matches!(
            tile_map_from_str(text),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_layout_needs_floor_and_targets() {
        let no_targets = r#"(
            floors: [(x: 0.0, y: 500.0, w: 960.0, h: 32.0)],
            planks: [],
            targets: [],
        )"#;
        assert!(matches!(
            layout_from_str(no_targets),
            Err(MapError::ValidationError(_))
        ));

        let no_floor = r#"(
            floors: [],
            planks: [],
            targets: [(x: 100.0, y: 100.0, radius: 16.0)],
        )"#;
        assert!(matches!(
            layout_from_str(no_floor),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_size_slab_rejected() {
        let text = r#"(
            floors: [(x: 0.0, y: 500.0, w: 0.0, h: 32.0)],
            planks: [],
            targets: [(x: 100.0, y: 100.0, radius: 16.0)],
        )"#;
        assert!(matches!(
            layout_from_str(text),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_shipped_maps_validate() {
        tile_map_from_str(include_str!("../../assets/maps/caverns.ron")).unwrap();
        layout_from_str(include_str!("../../assets/maps/slingshot.ron")).unwrap();
    }
}
