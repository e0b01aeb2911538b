use relic_escape::entities::*;

#[test]
fn hero_traits_table() {
    assert_eq!(Hero::Wraith.traits(), HeroTraits { speed: 3.8, ammo: 7, health: 3 });
    assert_eq!(Hero::RuneKnight.traits(), HeroTraits { speed: 3.4, ammo: 6, health: 4 });
    assert_eq!(Hero::Ironbound.traits(), HeroTraits { speed: 3.0, ammo: 5, health: 5 });
}

#[test]
fn no_selection_plays_as_rune_knight() {
    assert_eq!(HeroTraits::for_selection(None), Hero::RuneKnight.traits());
    assert_eq!(HeroTraits::for_selection(Some(Hero::Wraith)), Hero::Wraith.traits());
}

#[test]
fn hero_names_parse_loosely() {
    assert_eq!("Wraith".parse(), Ok(Hero::Wraith));
    assert_eq!("rune knight".parse(), Ok(Hero::RuneKnight));
    assert_eq!("Rune-Knight".parse(), Ok(Hero::RuneKnight));
    assert_eq!("rune_knight".parse(), Ok(Hero::RuneKnight));
    assert_eq!("IRONBOUND".parse(), Ok(Hero::Ironbound));
}

#[test]
fn unknown_hero_is_an_error() {
    let err = "Bard".parse::<Hero>().unwrap_err();
    assert_eq!(err, ParseHeroError("Bard".to_string()));
    assert!(err.to_string().contains("Bard"));
}

#[test]
fn hero_display_matches_name() {
    for hero in Hero::ALL {
        assert_eq!(hero.to_string(), hero.name());
        assert_eq!(hero.name().parse(), Ok(hero));
    }
}

#[test]
fn player_spawn_takes_hero_stats() {
    let p = Player::spawn(Vec2 { x: 10.0, y: 20.0 }, Hero::Ironbound.traits());
    assert_eq!((p.x, p.y), (10.0, 20.0));
    assert_eq!((p.vx, p.vy), (0.0, 0.0));
    assert_eq!(p.ammo, 5);
    assert_eq!(p.health, 5);
    assert_eq!(p.max_health, 5);
    assert!(!p.on_ground);
    assert_eq!(p.center(), Vec2 { x: 22.0, y: 32.0 });
}

#[test]
fn enemy_roles_set_health() {
    let grunt = Enemy::spawn(0, Vec2::default(), EnemyRole::Grunt);
    let boss = Enemy::spawn(1, Vec2::default(), EnemyRole::Boss);
    assert_eq!(grunt.health, 1);
    assert_eq!(boss.health, 3);
    assert!(boss.is_boss());
    assert!(!grunt.is_boss());
    assert!(grunt.alive && boss.alive);
}
