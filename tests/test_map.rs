use relic_escape::entities::{EnemyRole, Vec2};
use relic_escape::map::*;

fn at(col: usize, row: usize) -> Vec2 {
    Vec2 { x: col as f32 * TILE_SIZE, y: row as f32 * TILE_SIZE }
}

// ── Standard level ────────────────────────────────────────────────────────────

#[test]
fn standard_level_dimensions() {
    let map = Map::standard();
    assert_eq!(map.columns(), 29);
    assert_eq!(map.rows(), 10);
    assert_eq!(map.pixel_width(), 696.0);
    assert_eq!(map.pixel_height(), 240.0);
}

#[test]
fn standard_level_passes_strict_parse() {
    assert_eq!(Map::parse(&LEVEL), Ok(Map::standard()));
}

#[test]
fn standard_level_has_exactly_one_boss() {
    let bosses = Map::standard()
        .enemy_spawns()
        .into_iter()
        .filter(|(_, role)| *role == EnemyRole::Boss)
        .count();
    assert_eq!(bosses, 1);
}

// ── is_solid ──────────────────────────────────────────────────────────────────

#[test]
fn walls_and_platforms_are_solid() {
    let map = Map::standard();
    assert!(map.is_solid(0, 0)); // corner wall
    assert!(map.is_solid(2, 12)); // first platform tile
    assert!(map.is_solid(9, 14)); // floor
}

#[test]
fn everything_else_is_passable() {
    let map = Map::standard();
    assert!(!map.is_solid(1, 1)); // empty
    assert!(!map.is_solid(3, 13)); // relic
    assert!(!map.is_solid(4, 23)); // door
    assert!(!map.is_solid(8, 3)); // spawn
    assert!(!map.is_solid(1, 16)); // enemy
}

#[test]
fn out_of_bounds_is_not_solid() {
    let map = Map::standard();
    assert!(!map.is_solid(-1, 0));
    assert!(!map.is_solid(0, -1));
    assert!(!map.is_solid(10, 0));
    assert!(!map.is_solid(0, 29));
    assert!(!map.is_solid(500, 500));
}

// ── find_first / find_all ─────────────────────────────────────────────────────

#[test]
fn find_first_returns_pixel_origin() {
    let map = Map::standard();
    assert_eq!(map.find_first(Tile::Spawn), at(3, 8));
    assert_eq!(map.find_first(Tile::Relic), at(13, 3));
    assert_eq!(map.find_first(Tile::Door), at(23, 4));
}

#[test]
fn find_first_scans_row_major() {
    let map = Map::parse(&["..E", "E..", "..."]).unwrap();
    assert_eq!(map.find_first(Tile::Enemy), at(2, 0));
}

#[test]
fn find_first_falls_back_when_missing() {
    let map = Map::parse(&["#####", "#...#", "#####"]).unwrap();
    assert_eq!(map.find_first(Tile::Relic), FALLBACK_POSITION);
    assert_eq!(FALLBACK_POSITION, at(1, 1));
}

#[test]
fn find_all_keeps_scan_order() {
    let map = Map::standard();
    assert_eq!(map.find_all(Tile::Enemy), vec![at(16, 1), at(6, 6), at(25, 8)]);
    assert!(map.find_all(Tile::Boss).len() == 1);
}

#[test]
fn enemy_spawns_interleave_grunts_and_boss() {
    let spawns = Map::standard().enemy_spawns();
    assert_eq!(
        spawns,
        vec![
            (at(16, 1), EnemyRole::Grunt),
            (at(18, 3), EnemyRole::Boss),
            (at(6, 6), EnemyRole::Grunt),
            (at(25, 8), EnemyRole::Grunt),
        ]
    );
}

// ── parse errors ──────────────────────────────────────────────────────────────

#[test]
fn parse_rejects_empty_grid() {
    let rows: [&str; 0] = [];
    assert_eq!(Map::parse(&rows), Err(MapError::Empty));
}

#[test]
fn parse_rejects_ragged_rows() {
    assert_eq!(
        Map::parse(&["###", "#.", "###"]),
        Err(MapError::RaggedRow { row: 1, expected: 3, found: 2 })
    );
}

#[test]
fn parse_rejects_unknown_symbols() {
    assert_eq!(
        Map::parse(&["###", "#?#", "###"]),
        Err(MapError::UnknownSymbol { symbol: '?', row: 1, col: 1 })
    );
}

#[test]
fn parse_rejects_second_boss() {
    assert_eq!(Map::parse(&["B.B"]), Err(MapError::TooManyBosses(2)));
}

#[test]
fn parse_errors_read_well() {
    let err = Map::parse(&["#x"]).unwrap_err();
    assert_eq!(err.to_string(), "unknown tile symbol 'x' at row 0, column 1");
}
