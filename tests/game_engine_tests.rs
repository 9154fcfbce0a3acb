use naval_battle::{
    CellStatus, Coordinate, ErrorKind, Game, GameConfig, GameError, IdGenerator, Orientation, Phase,
    Player, ShotResult,
};

fn new_game(ids: &mut IdGenerator, config: &GameConfig) -> Game {
    let players = vec![
        Player::new(ids, "Alice", config).unwrap(),
        Player::new(ids, "Bob", config).unwrap(),
    ];
    Game::new(ids, config.grid_size(), players).unwrap()
}

/// Standard fleet laid out on rows 0, 2, 4, 6 and 8, all facing +x.
fn place_standard_fleet(game: &mut Game, ids: &mut IdGenerator, idx: usize) {
    for (row, &size) in [5usize, 4, 3, 3, 2].iter().enumerate() {
        game.place_ship(
            ids,
            idx,
            Coordinate::new(0, row * 2),
            size,
            Orientation::Horizontal,
            format!("ship-{}", row),
        )
        .unwrap();
    }
}

fn playing_game() -> (Game, IdGenerator) {
    let mut ids = IdGenerator::new();
    let mut game = new_game(&mut ids, &GameConfig::standard());
    game.begin_placement().unwrap();
    place_standard_fleet(&mut game, &mut ids, 0);
    place_standard_fleet(&mut game, &mut ids, 1);
    game.start().unwrap();
    (game, ids)
}

fn sink_everything(game: &mut Game, attacker: usize, defender: usize) -> Vec<ShotResult> {
    let mut results = Vec::new();
    for (row, &size) in [5usize, 4, 3, 3, 2].iter().enumerate() {
        for x in 0..size {
            results.push(game.shoot(attacker, defender, Coordinate::new(x, row * 2)).unwrap());
        }
    }
    results
}

#[test]
fn concrete_scenario() {
    let mut ids = IdGenerator::new();
    let mut game = new_game(&mut ids, &GameConfig::standard());

    game.place_ship(&mut ids, 1, Coordinate::new(0, 0), 5, Orientation::Horizontal, "Carrier")
        .unwrap();
    let defender = game.player(1).unwrap();
    let carrier = &defender.fleet().ships()[0];
    let expected: Vec<Coordinate> = (0..5).map(|x| Coordinate::new(x, 0)).collect();
    assert_eq!(carrier.coordinates(), expected.as_slice());

    let err = game
        .place_ship(&mut ids, 1, Coordinate::new(0, 0), 4, Orientation::Vertical, "Battleship")
        .unwrap_err();
    assert_eq!(err, GameError::ShipOverlaps);
    assert_eq!(game.player(1).unwrap().fleet().len(), 1);

    assert_eq!(game.shoot(0, 1, Coordinate::new(2, 0)).unwrap(), ShotResult::Hit);
    assert!(!game.player(1).unwrap().fleet().ships()[0].is_sunk());
    assert_eq!(
        game.shoot(0, 1, Coordinate::new(2, 0)).unwrap(),
        ShotResult::AlreadyHit
    );
}

#[test]
fn new_game_needs_two_players_of_matching_size() {
    let mut ids = IdGenerator::new();
    let config = GameConfig::standard();
    let solo = vec![Player::new(&mut ids, "Solo", &config).unwrap()];
    assert_eq!(
        Game::new(&mut ids, 10, solo).unwrap_err(),
        GameError::TooFewPlayers(1)
    );

    let small = GameConfig::new(6, vec![2]).unwrap();
    let players = vec![
        Player::new(&mut ids, "A", &config).unwrap(),
        Player::new(&mut ids, "B", &small).unwrap(),
    ];
    assert_eq!(
        Game::new(&mut ids, 10, players).unwrap_err(),
        GameError::GridSizeMismatch {
            expected: 10,
            found: 6
        }
    );
}

#[test]
fn phases_only_move_forward() {
    let mut ids = IdGenerator::new();
    let mut game = new_game(&mut ids, &GameConfig::standard());
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.start().unwrap_err(), GameError::WrongPhase(Phase::Setup));

    game.begin_placement().unwrap();
    game.begin_placement().unwrap();
    assert_eq!(game.phase(), Phase::Placement);

    place_standard_fleet(&mut game, &mut ids, 0);
    place_standard_fleet(&mut game, &mut ids, 1);
    game.start().unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(
        game.begin_placement().unwrap_err(),
        GameError::WrongPhase(Phase::Playing)
    );
    let err = game
        .place_ship(&mut ids, 0, Coordinate::new(9, 9), 1, Orientation::Vertical, "late")
        .unwrap_err();
    assert_eq!(err, GameError::WrongPhase(Phase::Playing));
    assert_eq!(err.kind(), ErrorKind::IllegalState);
}

#[test]
fn start_requires_every_fleet_complete() {
    let mut ids = IdGenerator::new();
    let mut game = new_game(&mut ids, &GameConfig::standard());
    game.begin_placement().unwrap();
    place_standard_fleet(&mut game, &mut ids, 0);

    let bob = game.player(1).unwrap().id();
    let err = game.start().unwrap_err();
    assert_eq!(err, GameError::FleetIncomplete(bob));
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert_eq!(game.phase(), Phase::Placement);

    place_standard_fleet(&mut game, &mut ids, 1);
    game.switch_turn();
    game.start().unwrap();
    assert_eq!(game.current_player_index(), 0);
}

#[test]
fn placement_checks_bounds_and_fleet() {
    let mut ids = IdGenerator::new();
    let mut game = new_game(&mut ids, &GameConfig::standard());
    assert!(!game.can_place_ship(0, Coordinate::new(7, 0), 5, Orientation::Horizontal));
    assert!(!game.can_place_ship(0, Coordinate::new(2, 0), 5, Orientation::HorizontalLeft));
    assert!(game.can_place_ship(0, Coordinate::new(4, 0), 5, Orientation::HorizontalLeft));
    assert!(!game.can_place_ship(7, Coordinate::new(0, 0), 2, Orientation::Vertical));

    assert_eq!(
        game.place_ship(&mut ids, 0, Coordinate::new(7, 0), 5, Orientation::Horizontal, "x")
            .unwrap_err(),
        GameError::ShipOutOfBounds
    );
    assert_eq!(
        game.place_ship(&mut ids, 0, Coordinate::new(0, 0), 0, Orientation::Horizontal, "x")
            .unwrap_err(),
        GameError::InvalidShipSize(0)
    );
    assert!(!game.can_place_ship(0, Coordinate::new(0, 0), 1 << 34, Orientation::Vertical));
    assert_eq!(
        game.place_ship(&mut ids, 0, Coordinate::new(0, 0), usize::MAX, Orientation::Vertical, "x")
            .unwrap_err(),
        GameError::ShipOutOfBounds
    );
    assert_eq!(game.player(0).unwrap().grid().count(CellStatus::Ship), 0);
}

#[test]
fn shoot_validates_arguments() {
    let (mut game, _) = playing_game();
    assert_eq!(
        game.shoot(0, 5, Coordinate::new(0, 0)).unwrap_err(),
        GameError::UnknownPlayer(5)
    );
    assert_eq!(
        game.shoot(1, 1, Coordinate::new(0, 0)).unwrap_err(),
        GameError::SelfTarget
    );
    let outside = Coordinate::new(10, 3);
    let err = game.shoot(0, 1, outside).unwrap_err();
    assert_eq!(err, GameError::InvalidCoordinate(outside));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn shot_outcome_follows_occupancy() {
    let (mut game, _) = playing_game();
    assert_eq!(game.shoot(0, 1, Coordinate::new(9, 9)).unwrap(), ShotResult::Miss);
    assert_eq!(game.shoot(0, 1, Coordinate::new(9, 9)).unwrap(), ShotResult::AlreadyMiss);
    assert_eq!(game.shoot(0, 1, Coordinate::new(0, 8)).unwrap(), ShotResult::Hit);
    assert_eq!(game.shoot(0, 1, Coordinate::new(1, 8)).unwrap(), ShotResult::Sunk);
    assert_eq!(game.shoot(0, 1, Coordinate::new(1, 8)).unwrap(), ShotResult::AlreadyHit);

    let bob = game.player(1).unwrap();
    assert_eq!(bob.grid().cell(Coordinate::new(1, 8)).unwrap(), CellStatus::Hit);
    assert_eq!(bob.display_status(Coordinate::new(1, 8)).unwrap(), CellStatus::Sunk);
    assert_eq!(bob.fleet().remaining_sizes(), vec![5, 4, 3, 3]);
    // shooting never moves the turn by itself
    assert_eq!(game.current_player_index(), 0);
}

#[test]
fn target_view_hides_unshot_ships() {
    let (mut game, _) = playing_game();
    game.shoot(0, 1, Coordinate::new(0, 0)).unwrap();
    game.shoot(0, 1, Coordinate::new(9, 0)).unwrap();
    let view = game.player(1).unwrap().target_view();
    assert_eq!(view.status(Coordinate::new(0, 0)), Some(CellStatus::Hit));
    assert_eq!(view.status(Coordinate::new(9, 0)), Some(CellStatus::Miss));
    assert_eq!(view.status(Coordinate::new(1, 0)), Some(CellStatus::Empty));
    assert_eq!(view.status(Coordinate::new(10, 0)), None);
    assert_eq!(view.untried().len(), 98);
}

#[test]
fn sinking_every_ship_finishes_the_game() {
    let (mut game, _) = playing_game();
    assert!(!game.is_finished());
    assert!(game.winner().is_none());

    let results = sink_everything(&mut game, 0, 1);
    assert_eq!(results.iter().filter(|r| **r == ShotResult::Sunk).count(), 5);
    assert_eq!(results.last(), Some(&ShotResult::Sunk));

    assert!(game.is_finished());
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.winner_index(), Some(0));
    assert_eq!(game.winner().unwrap().name(), "Alice");
    assert!(game.player(1).unwrap().has_lost());

    assert_eq!(
        game.shoot(1, 0, Coordinate::new(0, 0)).unwrap_err(),
        GameError::WrongPhase(Phase::Finished)
    );
    assert_eq!(game.start().unwrap_err(), GameError::WrongPhase(Phase::Finished));
}

#[test]
fn turn_pointer_cycles() {
    let (mut game, _) = playing_game();
    assert_eq!(game.current_player().name(), "Alice");
    game.switch_turn();
    assert_eq!(game.current_player().name(), "Bob");
    game.switch_turn();
    assert_eq!(game.current_player_index(), 0);
    assert_eq!(game.opponents(0), vec![1]);
    assert_eq!(game.target_of(1).unwrap(), 0);
    assert_eq!(game.target_of(4).unwrap_err(), GameError::UnknownPlayer(4));
}

#[test]
fn three_players_target_explicitly() {
    let mut ids = IdGenerator::new();
    let config = GameConfig::standard();
    let players = vec![
        Player::new(&mut ids, "A", &config).unwrap(),
        Player::new(&mut ids, "B", &config).unwrap(),
        Player::new(&mut ids, "C", &config).unwrap(),
    ];
    let mut game = Game::new(&mut ids, 10, players).unwrap();
    game.begin_placement().unwrap();
    for idx in 0..3 {
        place_standard_fleet(&mut game, &mut ids, idx);
    }
    game.start().unwrap();
    assert_eq!(game.opponents(1), vec![0, 2]);
    assert_eq!(game.target_of(0).unwrap(), 1);

    sink_everything(&mut game, 0, 1);
    assert!(!game.is_finished());
    sink_everything(&mut game, 0, 2);
    assert!(game.is_finished());
    assert_eq!(game.winner_index(), Some(0));
}

#[test]
fn ids_are_unique_and_increasing() {
    let (game, ids) = playing_game();
    let a = game.player(0).unwrap();
    let b = game.player(1).unwrap();
    assert!(a.id() < b.id());
    let ship_ids: Vec<_> = a
        .fleet()
        .ships()
        .iter()
        .chain(b.fleet().ships())
        .map(|s| s.id().get())
        .collect();
    assert_eq!(ship_ids, (1..=10).collect::<Vec<u32>>());
    let (next_game, next_player, next_ship) = ids.peek();
    assert!(next_game > game.id());
    assert_eq!(next_player.get(), 3);
    assert_eq!(next_ship.get(), 11);
}

#[test]
fn players_take_their_composition_from_the_config() {
    let mut ids = IdGenerator::new();
    let config = GameConfig::new(6, vec![4, 2]).unwrap();
    let player = Player::new(&mut ids, "Custom", &config).unwrap();
    assert_eq!(player.fleet().required_sizes(), &[4, 2]);
    assert_eq!(player.grid().size(), 6);
    assert_eq!(player.fleet().missing_sizes(), vec![4, 2]);
}
