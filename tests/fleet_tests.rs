use naval_battle::{
    ship_name, ConfigError, Coordinate, Fleet, GameConfig, GameError, Grid, Orientation, Ship,
    ShipId,
};

fn ship(id: u32, x: usize, y: usize, size: usize, orientation: Orientation) -> Ship {
    let coords = Grid::generate_ship_coordinates(Coordinate::new(x, y), size, orientation).unwrap();
    Ship::new(ShipId(id), ship_name(size, 0), coords, orientation).unwrap()
}

fn standard_ships() -> Vec<Ship> {
    vec![
        ship(1, 0, 0, 5, Orientation::Horizontal),
        ship(2, 0, 1, 4, Orientation::Horizontal),
        ship(3, 0, 2, 3, Orientation::Horizontal),
        ship(4, 0, 3, 3, Orientation::Horizontal),
        ship(5, 0, 4, 2, Orientation::Horizontal),
    ]
}

#[test]
fn ship_rejects_broken_geometry() {
    let gap = vec![Coordinate::new(0, 0), Coordinate::new(2, 0)];
    assert_eq!(
        Ship::new(ShipId(1), "gap", gap, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidShipGeometry
    );
    let wrong_axis = vec![Coordinate::new(0, 0), Coordinate::new(0, 1)];
    assert_eq!(
        Ship::new(ShipId(1), "axis", wrong_axis, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidShipGeometry
    );
    assert_eq!(
        Ship::new(ShipId(1), "empty", Vec::new(), Orientation::Vertical).unwrap_err(),
        GameError::InvalidShipSize(0)
    );
}

#[test]
fn ship_reports_its_geometry() {
    let s = ship(9, 3, 5, 3, Orientation::VerticalUp);
    assert_eq!(s.size(), 3);
    assert_eq!(s.start(), Coordinate::new(3, 5));
    assert!(s.occupies(Coordinate::new(3, 3)));
    assert!(!s.occupies(Coordinate::new(3, 6)));
    assert!(!s.is_sunk());
    assert_eq!(s.name(), "Cruiser");
}

#[test]
fn complete_only_on_exact_multiset() {
    let mut fleet = Fleet::standard();
    assert!(!fleet.is_complete());
    for s in standard_ships() {
        assert!(fleet.can_add_ship(&s));
        fleet.add_ship(s);
    }
    assert!(fleet.is_complete());
    assert!(fleet.missing_sizes().is_empty());

    // one ship too many breaks the multiset equality
    fleet.add_ship(ship(6, 0, 6, 2, Orientation::Horizontal));
    assert!(!fleet.is_complete());
}

#[test]
fn order_of_placement_does_not_matter() {
    let mut fleet = Fleet::new(&[2, 3, 5]).unwrap();
    fleet.add_ship(ship(1, 0, 0, 5, Orientation::Vertical));
    fleet.add_ship(ship(2, 1, 0, 2, Orientation::Vertical));
    assert_eq!(fleet.missing_sizes(), vec![3]);
    fleet.add_ship(ship(3, 2, 0, 3, Orientation::Vertical));
    assert!(fleet.is_complete());
}

#[test]
fn wrong_sizes_never_complete() {
    let mut fleet = Fleet::new(&[3, 2]).unwrap();
    fleet.add_ship(ship(1, 0, 0, 3, Orientation::Horizontal));
    fleet.add_ship(ship(2, 0, 1, 3, Orientation::Horizontal));
    assert!(!fleet.is_complete());
    assert_eq!(fleet.missing_sizes(), vec![2]);
}

#[test]
fn overlapping_candidate_is_refused() {
    let mut fleet = Fleet::standard();
    fleet.add_ship(ship(1, 0, 0, 5, Orientation::Horizontal));
    assert!(!fleet.can_add_ship(&ship(2, 2, 0, 3, Orientation::Vertical)));
    assert!(fleet.can_add_ship(&ship(3, 2, 1, 3, Orientation::Vertical)));
}

#[test]
fn empty_fleet_is_not_destroyed() {
    let fleet = Fleet::standard();
    assert!(fleet.is_empty());
    assert!(!fleet.are_all_ships_sunk());
    assert!(fleet.remaining_sizes().is_empty());
}

#[test]
fn composition_must_be_positive_and_non_empty() {
    assert_eq!(Fleet::new(&[]).unwrap_err(), ConfigError::EmptyFleet);
    assert_eq!(Fleet::new(&[3, 0]).unwrap_err(), ConfigError::ZeroSizedShip);
}

#[test]
fn config_validation() {
    assert!(GameConfig::new(10, vec![5, 4, 3, 3, 2]).is_ok());
    assert_eq!(
        GameConfig::new(4, vec![2]).unwrap_err(),
        ConfigError::GridTooSmall { size: 4, min: 5 }
    );
    assert_eq!(
        GameConfig::new(5, vec![5, 5, 5, 5, 5, 1]).unwrap_err(),
        ConfigError::FleetTooLarge {
            cells: 26,
            capacity: 25
        }
    );
    assert_eq!(
        GameConfig::new(10, vec![usize::MAX, 1]).unwrap_err(),
        ConfigError::FleetTooLarge {
            cells: usize::MAX,
            capacity: 100
        }
    );
    assert_eq!(
        GameConfig::new(usize::MAX, vec![1]).unwrap_err(),
        ConfigError::GridTooLarge { size: usize::MAX }
    );
    assert_eq!(
        GameConfig::new(5, vec![6]).unwrap_err(),
        ConfigError::ShipTooLong {
            size: 6,
            grid_size: 5
        }
    );
    assert!(GameConfig::new(5, vec![5, 5]).is_ok());
    assert_eq!(GameConfig::default(), GameConfig::standard());
    assert_eq!(GameConfig::standard().total_ship_cells(), 17);
}

#[test]
fn ship_names_follow_classes() {
    assert_eq!(ship_name(5, 0), "Carrier");
    assert_eq!(ship_name(4, 0), "Battleship");
    assert_eq!(ship_name(3, 0), "Cruiser");
    assert_eq!(ship_name(3, 1), "Submarine");
    assert_eq!(ship_name(3, 2), "Ship-3-3");
    assert_eq!(ship_name(2, 0), "Destroyer");
    assert_eq!(ship_name(7, 0), "Ship-7");
}
