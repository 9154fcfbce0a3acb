//! Identity types and the generator that hands them out.
//!
//! There is no process-wide counter: whoever orchestrates a game owns an
//! [`IdGenerator`] and threads it through construction calls. A restored
//! game reseeds its generator from the ids found in the snapshot.

use core::fmt;

use crate::core::common::GameError;
use crate::core::game::Game;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            pub fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identity of a [`Game`].
    GameId
);
id_type!(
    /// Identity of a player.
    PlayerId
);
id_type!(
    /// Identity of a placed ship.
    ShipId
);

/// Monotonic source of game, player and ship ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next_game: u32,
    next_player: u32,
    next_ship: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Fresh generator; the first id of every kind is 1.
    pub fn new() -> Self {
        Self {
            next_game: 1,
            next_player: 1,
            next_ship: 1,
        }
    }

    /// Generator whose next ids are strictly above every id in `game`.
    pub fn after(game: &Game) -> Self {
        let mut ids = Self::new();
        ids.reseed_from(game);
        ids
    }

    pub fn next_game_id(&mut self) -> Result<GameId, GameError> {
        bump(&mut self.next_game).map(GameId)
    }

    pub fn next_player_id(&mut self) -> Result<PlayerId, GameError> {
        bump(&mut self.next_player).map(PlayerId)
    }

    pub fn next_ship_id(&mut self) -> Result<ShipId, GameError> {
        bump(&mut self.next_ship).map(ShipId)
    }

    /// Advance every counter past the largest id present in `game`.
    /// Counters never move backwards.
    pub fn reseed_from(&mut self, game: &Game) {
        let mut max_player = 0;
        let mut max_ship = 0;
        for player in game.players() {
            max_player = max_player.max(player.id().get());
            for ship in player.fleet().ships() {
                max_ship = max_ship.max(ship.id().get());
            }
        }
        self.next_game = self.next_game.max(game.id().get().saturating_add(1));
        self.next_player = self.next_player.max(max_player.saturating_add(1));
        self.next_ship = self.next_ship.max(max_ship.saturating_add(1));
    }

    /// Next ids that would be returned, as `(game, player, ship)`.
    pub fn peek(&self) -> (GameId, PlayerId, ShipId) {
        (
            GameId(self.next_game),
            PlayerId(self.next_player),
            ShipId(self.next_ship),
        )
    }
}

/// Hand out the counter's value and advance it. `u32::MAX` is never handed
/// out, so a counter that reached it is exhausted.
fn bump(counter: &mut u32) -> Result<u32, GameError> {
    let next = counter.checked_add(1).ok_or(GameError::IdsExhausted)?;
    let id = *counter;
    *counter = next;
    Ok(id)
}
