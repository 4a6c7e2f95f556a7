use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RosterError;
use crate::roster::slots::SlotList;

/// Number of teams dealt per draw.
pub const TEAM_COUNT: usize = 3;

/// Players per team.
pub const TEAM_SIZE: usize = 5;

/// Result of one randomized team draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraw {
    teams: Vec<Vec<String>>,
}

impl TeamDraw {
    /// Shuffle the occupied main-roster seats and deal them round-robin
    /// into 3 teams of 5. Requires a full main roster; every call
    /// re-shuffles, so two draws over the same roster rarely agree.
    pub fn draw<R: Rng>(main: &SlotList, rng: &mut R) -> Result<Self, RosterError> {
        let mut players: Vec<String> = main.occupied().map(str::to_string).collect();

        if players.len() < TEAM_COUNT * TEAM_SIZE {
            return Err(RosterError::InsufficientPlayers {
                occupied: players.len(),
                teams: TEAM_COUNT,
                size: TEAM_SIZE,
            });
        }

        players.shuffle(rng);

        let mut teams = vec![Vec::with_capacity(TEAM_SIZE); TEAM_COUNT];
        for (index, player) in players.into_iter().enumerate() {
            teams[index % TEAM_COUNT].push(player);
        }

        Ok(Self { teams })
    }

    pub fn teams(&self) -> &[Vec<String>] {
        &self.teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn full_roster() -> SlotList {
        let mut main = SlotList::with_capacity(15);
        for index in 0..15 {
            main.set(index, format!("Jogador {}", index + 1));
        }
        main
    }

    #[test]
    fn test_draw_rejects_short_roster() {
        let mut main = SlotList::with_capacity(15);
        for index in 0..14 {
            main.set(index, format!("Jogador {}", index + 1));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = TeamDraw::draw(&main, &mut rng).unwrap_err();
        assert_eq!(
            err,
            RosterError::InsufficientPlayers { occupied: 14, teams: 3, size: 5 }
        );
    }

    #[test]
    fn test_draw_deals_three_teams_of_five() {
        let main = full_roster();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let draw = TeamDraw::draw(&main, &mut rng).unwrap();

        assert_eq!(draw.teams().len(), 3);
        for team in draw.teams() {
            assert_eq!(team.len(), 5);
        }
    }

    #[test]
    fn test_draw_places_every_player_exactly_once() {
        let main = full_roster();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let draw = TeamDraw::draw(&main, &mut rng).unwrap();

        let mut dealt: Vec<&str> =
            draw.teams().iter().flatten().map(String::as_str).collect();
        dealt.sort_unstable();

        let mut expected: Vec<String> = main.occupied().map(str::to_string).collect();
        expected.sort_unstable();

        assert_eq!(dealt, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_draw() {
        let main = full_roster();

        let first = TeamDraw::draw(&main, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let second = TeamDraw::draw(&main, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();

        assert_eq!(first, second);
    }
}
