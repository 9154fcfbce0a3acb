use naval_battle::{
    calc_pdf, sample_pdf, Coordinate, GameConfig, GameError, Grid, IdGenerator, Orientation,
    Player, Session, Strategy,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn placed_player(seed: u64) -> Player {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = Session::two_player(&GameConfig::standard()).unwrap();
    session.begin_placement().unwrap();
    session.auto_place_fleet(&mut rng).unwrap();
    session.game().players()[0].clone()
}

#[test]
fn pdf_of_fresh_view_is_normalized() {
    let mut ids = IdGenerator::new();
    let player = Player::new(&mut ids, "Fresh", &GameConfig::standard()).unwrap();
    let view = player.target_view();
    let pdf = calc_pdf(&view);
    assert_eq!(pdf.len(), 100);
    // no ships placed means nothing remains afloat; mass spreads evenly
    let total: f64 = pdf.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(pdf.iter().all(|&p| (p - 0.01).abs() < 1e-12));
}

#[test]
fn center_cells_outweigh_corners() {
    let player = placed_player(5);
    let pdf = calc_pdf(&player.target_view());
    let total: f64 = pdf.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    let corner = pdf[0];
    let center = pdf[5 * 10 + 5];
    assert!(center > corner);
}

#[test]
fn sample_pdf_only_picks_positive_cells() {
    let mut pdf = vec![0.0; 25];
    pdf[7] = 1.0;
    let mut rng = SmallRng::seed_from_u64(9);
    for _ in 0..20 {
        assert_eq!(
            sample_pdf(&pdf, 5, 0.5, &mut rng),
            Some(Coordinate::new(2, 1))
        );
    }
    assert_eq!(sample_pdf(&[0.0; 25], 5, 0.5, &mut rng), None);
}

#[test]
fn fleet_placement_fails_cleanly_when_impossible() {
    let mut rng = SmallRng::seed_from_u64(1);
    let grid = Grid::new(5);
    assert_eq!(
        Strategy::Random.choose_fleet_placement(&grid, &[5, 5, 5, 5, 5, 5], &mut rng),
        Err(GameError::UnableToPlaceFleet)
    );
}

#[test]
fn placements_respect_existing_ships() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut session = Session::two_player(&GameConfig::standard()).unwrap();
    session.begin_placement().unwrap();
    session
        .place_ship(Coordinate::new(0, 0), 5, Orientation::Vertical, None)
        .unwrap();
    session.auto_place_fleet(&mut rng).unwrap();
    let fleet = session.game().players()[0].fleet();
    assert!(fleet.is_complete());
    assert_eq!(fleet.ships()[0].start(), Coordinate::new(0, 0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chosen_fleet_never_overlaps(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::new(10);
        let placements = Strategy::Probability
            .choose_fleet_placement(&grid, &[5, 4, 3, 3, 2], &mut rng)
            .unwrap();
        prop_assert_eq!(placements.len(), 5);
        let mut seen = Vec::new();
        for p in &placements {
            for c in Grid::generate_ship_coordinates(p.start, p.size, p.orientation).unwrap() {
                prop_assert!(c.is_valid(10));
                prop_assert!(!seen.contains(&c));
                seen.push(c);
            }
        }
        prop_assert_eq!(seen.len(), 17);
    }

    #[test]
    fn targets_are_always_untried(seed in any::<u64>(), shots in 0usize..100) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = Session::two_player(&GameConfig::standard()).unwrap();
        session.begin_placement().unwrap();
        while !session.all_fleets_ready() {
            session.auto_place_fleet(&mut rng).unwrap();
        }
        session.finish_placement().unwrap();
        let mut game = session.into_game();
        for strategy in [Strategy::Random, Strategy::Probability] {
            for _ in 0..shots / 2 {
                if game.is_finished() {
                    break;
                }
                let view = game.player(1).unwrap().target_view();
                let target = strategy.choose_target(&view, &mut rng).unwrap();
                prop_assert!(view.is_untried(target));
                prop_assert!(game.shoot(0, 1, target).unwrap().is_fresh());
            }
        }
    }
}
