//! Static tile grid and the lookups the rest of the game runs against.
//!
//! Positions handed out by this module are in pixels (top-left corner of the
//! tile).  Missing symbols and out-of-range cells never fail: lookups fall
//! back to a fixed position and off-grid cells read as empty.

use thiserror::Error;

use crate::entities::{EnemyRole, Vec2};

/// Edge length of one tile, in pixels.
pub const TILE_SIZE: f32 = 24.0;

/// The one shipped level.
pub const LEVEL: [&str; 10] = [
    "#############################",
    "#...............E...........#",
    "#...........====............#",
    "#............R....B.........#",
    "#.......====...........D....#",
    "#...........................#",
    "#.....E.............====....#",
    "#............====...........#",
    "#..S.....................E..#",
    "#############################",
];

/// Position returned by [`Map::find_first`] when the symbol is absent.
pub const FALLBACK_POSITION: Vec2 = Vec2 { x: TILE_SIZE, y: TILE_SIZE };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Platform,
    Spawn,
    Relic,
    Door,
    Enemy,
    Boss,
}

impl Tile {
    pub fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            '.' => Some(Tile::Empty),
            '#' => Some(Tile::Wall),
            '=' => Some(Tile::Platform),
            'S' => Some(Tile::Spawn),
            'R' => Some(Tile::Relic),
            'D' => Some(Tile::Door),
            'E' => Some(Tile::Enemy),
            'B' => Some(Tile::Boss),
            _ => None,
        }
    }

    /// Inverse of [`Tile::from_symbol`]; lets tests print grids back out.
    pub fn symbol(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Platform => '=',
            Tile::Spawn => 'S',
            Tile::Relic => 'R',
            Tile::Door => 'D',
            Tile::Enemy => 'E',
            Tile::Boss => 'B',
        }
    }

    /// Walls and platforms block movement; everything else is passable.
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall | Tile::Platform)
    }
}

/// Rejections from [`Map::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("map declares {0} bosses, at most one is allowed")]
    TooManyBosses(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    rows: Vec<Vec<Tile>>,
    width: usize,
}

impl Map {
    /// The shipped level.  Unknown symbols in the constant read as empty.
    pub fn standard() -> Map {
        let rows: Vec<Vec<Tile>> = LEVEL
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| Tile::from_symbol(c).unwrap_or(Tile::Empty))
                    .collect()
            })
            .collect();
        let width = rows.first().map_or(0, Vec::len);
        Map { rows, width }
    }

    /// Strict parser for hand-built grids, used by tests to stage scenes.
    /// The game itself only ever plays [`Map::standard`].
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Map, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();

        let mut tiles = Vec::with_capacity(rows.len());
        let mut bosses = 0;
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow { row, expected: width, found });
            }
            let mut parsed = Vec::with_capacity(width);
            for (col, symbol) in line.chars().enumerate() {
                let tile = Tile::from_symbol(symbol)
                    .ok_or(MapError::UnknownSymbol { symbol, row, col })?;
                if tile == Tile::Boss {
                    bosses += 1;
                }
                parsed.push(tile);
            }
            tiles.push(parsed);
        }

        if bosses > 1 {
            return Err(MapError::TooManyBosses(bosses));
        }
        Ok(Map { rows: tiles, width })
    }

    /// Number of tile columns.
    pub fn columns(&self) -> usize {
        self.width
    }

    /// Number of tile rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.rows.len() as f32 * TILE_SIZE
    }

    /// Tile at a (possibly negative or off-grid) cell.
    pub fn tile(&self, row: i32, col: i32) -> Option<Tile> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        self.tile(row, col).map_or(false, Tile::is_solid)
    }

    /// Row-major iterator over every cell as `(row, col, tile)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, tiles)| {
            tiles.iter().enumerate().map(move |(col, &tile)| (row, col, tile))
        })
    }

    /// First cell holding `tile` in row-major order, or [`FALLBACK_POSITION`].
    pub fn find_first(&self, tile: Tile) -> Vec2 {
        self.cells()
            .find(|&(_, _, t)| t == tile)
            .map_or(FALLBACK_POSITION, |(row, col, _)| cell_origin(row, col))
    }

    pub fn find_all(&self, tile: Tile) -> Vec<Vec2> {
        self.cells()
            .filter(|&(_, _, t)| t == tile)
            .map(|(row, col, _)| cell_origin(row, col))
            .collect()
    }

    /// Enemy and boss spawns together, in row-major order.  The index in
    /// the returned vector becomes the enemy id.
    pub fn enemy_spawns(&self) -> Vec<(Vec2, EnemyRole)> {
        self.cells()
            .filter_map(|(row, col, tile)| {
                let role = match tile {
                    Tile::Enemy => EnemyRole::Grunt,
                    Tile::Boss => EnemyRole::Boss,
                    _ => return None,
                };
                Some((cell_origin(row, col), role))
            })
            .collect()
    }
}

fn cell_origin(row: usize, col: usize) -> Vec2 {
    Vec2 {
        x: col as f32 * TILE_SIZE,
        y: row as f32 * TILE_SIZE,
    }
}
