//! Generated sprite art
//!
//! Every texture in the arcade is built at startup from a character-art
//! pattern, so the repository ships no binary image assets. Patterns are
//! drawn facing right; games flip at draw time.

use macroquad::prelude::*;

/// Map a pattern character to a pixel color. `.` is transparent.
fn palette(c: char) -> Option<Color> {
    match c {
        '.' => None,
        'k' => Some(Color::from_rgba(20, 20, 24, 255)),    // near black
        'w' => Some(Color::from_rgba(240, 240, 235, 255)), // white
        'r' => Some(Color::from_rgba(214, 57, 57, 255)),   // red
        'R' => Some(Color::from_rgba(140, 28, 28, 255)),   // dark red
        'g' => Some(Color::from_rgba(88, 190, 94, 255)),   // green
        'G' => Some(Color::from_rgba(40, 120, 52, 255)),   // dark green
        'y' => Some(Color::from_rgba(246, 214, 86, 255)),  // yellow
        'o' => Some(Color::from_rgba(236, 140, 52, 255)),  // orange
        'b' => Some(Color::from_rgba(92, 148, 252, 255)),  // blue
        'p' => Some(Color::from_rgba(172, 96, 220, 255)),  // purple
        'n' => Some(Color::from_rgba(130, 94, 60, 255)),   // brown
        'N' => Some(Color::from_rgba(88, 62, 40, 255)),    // dark brown
        's' => Some(Color::from_rgba(120, 120, 132, 255)), // stone
        'S' => Some(Color::from_rgba(82, 82, 94, 255)),    // dark stone
        _ => None,
    }
}

/// Rasterize a pattern into an image. Rows must share one width.
pub fn image_from_pattern(rows: &[&str]) -> Image {
    let height = rows.len() as u16;
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
    let mut image = Image::gen_image_color(width, height, Color::from_rgba(0, 0, 0, 0));
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if let Some(color) = palette(c) {
                image.set_pixel(x as u32, y as u32, color);
            }
        }
    }
    image
}

fn texture_from_pattern(rows: &[&str]) -> Texture2D {
    let texture = Texture2D::from_image(&image_from_pattern(rows));
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// All textures shared by the games
pub struct SpriteBank {
    pub snake_head: Texture2D,
    pub snake_body: Texture2D,
    pub apple: Texture2D,
    pub bee_frames: [Texture2D; 4],
    pub hero_stand: Texture2D,
    pub hero_walk: [Texture2D; 2],
    pub hero_jump: Texture2D,
    pub gem: Texture2D,
    pub tile: Texture2D,
    pub ball: Texture2D,
    pub target: Texture2D,
}

impl SpriteBank {
    /// Build the whole bank. Needs a live rendering context.
    pub fn generate() -> Self {
        Self {
            snake_head: texture_from_pattern(&SNAKE_HEAD),
            snake_body: texture_from_pattern(&SNAKE_BODY),
            apple: texture_from_pattern(&APPLE),
            bee_frames: [
                texture_from_pattern(&BEE_0),
                texture_from_pattern(&BEE_1),
                texture_from_pattern(&BEE_2),
                texture_from_pattern(&BEE_3),
            ],
            hero_stand: texture_from_pattern(&HERO_STAND),
            hero_walk: [
                texture_from_pattern(&HERO_WALK_0),
                texture_from_pattern(&HERO_WALK_1),
            ],
            hero_jump: texture_from_pattern(&HERO_JUMP),
            gem: texture_from_pattern(&GEM),
            tile: texture_from_pattern(&TILE),
            ball: texture_from_pattern(&BALL),
            target: texture_from_pattern(&TARGET),
        }
    }
}

const SNAKE_HEAD: [&str; 8] = [
    ".gggggg.",
    "gggggggg",
    "gkgggkgg",
    "gggggggg",
    "ggGGGGgg",
    "gggggggg",
    "gggggggg",
    ".gggggg.",
];

const SNAKE_BODY: [&str; 8] = [
    ".gggggg.",
    "gGgggGgg",
    "gggggggg",
    "ggggGggg",
    "gGgggggg",
    "gggggGgg",
    "ggGggggg",
    ".gggggg.",
];

const APPLE: [&str; 8] = [
    "....n...",
    "...n....",
    ".rrrrrr.",
    "rrwrrrrr",
    "rrrrrrrr",
    "rrrrrrrr",
    "Rrrrrrr.",
    ".RRRRR..",
];

// Wing cycle: up, mid, down, mid
const BEE_0: [&str; 12] = [
    "...ww.......",
    "..wwww......",
    "..wwww......",
    "...ww.......",
    ".yyyykkyyy..",
    "yyyyyyyyyyyk",
    "ykkyyykkyyyk",
    "yyyyyyyyyyyk",
    ".yyyykkyyy..",
    "............",
    "............",
    "............",
];

const BEE_1: [&str; 12] = [
    "............",
    "............",
    "..wwww......",
    "..wwwww.....",
    ".yyyykkyyy..",
    "yyyyyyyyyyyk",
    "ykkyyykkyyyk",
    "yyyyyyyyyyyk",
    ".yyyykkyyy..",
    "............",
    "............",
    "............",
];

const BEE_2: [&str; 12] = [
    "............",
    "............",
    "............",
    "............",
    ".yyyykkyyy..",
    "yyyyyyyyyyyk",
    "ykkyyykkyyyk",
    "yyyyyyyyyyyk",
    ".yyyykkyyy..",
    "..wwww......",
    "..wwww......",
    "...ww.......",
];

const BEE_3: [&str; 12] = [
    "............",
    "............",
    "..wwww......",
    "..wwwww.....",
    ".yyyykkyyy..",
    "yyyyyyyyyyyk",
    "ykkyyykkyyyk",
    "yyyyyyyyyyyk",
    ".yyyykkyyy..",
    "............",
    "............",
    "............",
];

// 16x15 to match the platformer hitbox
const HERO_STAND: [&str; 15] = [
    "......oooo......",
    ".....oooooo.....",
    ".....okooko.....",
    ".....oooooo.....",
    "......oooo......",
    "....bbbbbbbb....",
    "...bbbbbbbbbb...",
    "...bobbbbbbob...",
    "...bbbbbbbbbb...",
    "....bbbbbbbb....",
    "......bbbb......",
    ".....bb..bb.....",
    ".....bb..bb.....",
    ".....nn..nn.....",
    ".....nn..nn.....",
];

const HERO_WALK_0: [&str; 15] = [
    "......oooo......",
    ".....oooooo.....",
    ".....okooko.....",
    ".....oooooo.....",
    "......oooo......",
    "....bbbbbbbb....",
    "...bbbbbbbbbb...",
    "...bobbbbbbob...",
    "...bbbbbbbbbb...",
    "....bbbbbbbb....",
    "......bbbb......",
    "....bb...bb.....",
    "...bb.....bb....",
    "...nn.....nn....",
    "..nn.......nn...",
];

const HERO_WALK_1: [&str; 15] = [
    "......oooo......",
    ".....oooooo.....",
    ".....okooko.....",
    ".....oooooo.....",
    "......oooo......",
    "....bbbbbbbb....",
    "...bbbbbbbbbb...",
    "...bobbbbbbob...",
    "...bbbbbbbbbb...",
    "....bbbbbbbb....",
    "......bbbb......",
    ".....bbbb.......",
    "......bbbb......",
    "......nnnn......",
    ".....nn..nn.....",
];

const HERO_JUMP: [&str; 15] = [
    "......oooo......",
    ".....oooooo.....",
    ".....okooko.....",
    ".....oooooo.....",
    "......oooo......",
    "..b.bbbbbbbb.b..",
    "..bbbbbbbbbbbb..",
    "...bobbbbbbob...",
    "...bbbbbbbbbb...",
    "....bbbbbbbb....",
    "......bbbb......",
    ".....bb..bb.....",
    "....bb....bb....",
    "....nn....nn....",
    "................",
];

const GEM: [&str; 8] = [
    "...pp...",
    "..pppp..",
    ".pwpppp.",
    "pppppppp",
    ".pppppp.",
    "..pppp..",
    "...pp...",
    "........",
];

const TILE: [&str; 8] = [
    "ssssssSs",
    "sSssssss",
    "ssssSsss",
    "SssssssS",
    "ssSsssss",
    "ssssssSs",
    "sSssSsss",
    "SSSSSSSS",
];

const BALL: [&str; 8] = [
    "..nnnn..",
    ".nnnnnn.",
    "nnwnnnnn",
    "nnnnnnnn",
    "nnnnnnnn",
    "nnnnnnnN",
    ".nnnnNN.",
    "..NNNN..",
];

const TARGET: [&str; 12] = [
    "....rrrr....",
    "..rrrrrrrr..",
    ".rrwrrrrwrr.",
    ".rrkrrrrkrr.",
    "rrrrrrrrrrrr",
    "rrrryyyyrrrr",
    "rrrryyyyrrrr",
    "rrrrrrrrrrrr",
    ".rrrrrrrrrr.",
    ".rRrrrrrrRr.",
    "..rRRRRRRr..",
    "....RRRR....",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_dimensions() {
        let img = image_from_pattern(&APPLE);
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 8);
    }

    #[test]
    fn test_pattern_pixels() {
        let img = image_from_pattern(&[".r", "w."]);
        assert_eq!(img.get_pixel(0, 0).a, 0.0); // transparent
        assert!(img.get_pixel(1, 0).r > 0.5); // red ink
        assert!(img.get_pixel(0, 1).g > 0.5); // white ink
    }

    #[test]
    fn test_all_rows_share_width() {
        for pattern in [&HERO_STAND[..], &HERO_WALK_0[..], &HERO_WALK_1[..], &HERO_JUMP[..]] {
            let w = pattern[0].len();
            assert!(pattern.iter().all(|r| r.len() == w));
        }
    }
}
