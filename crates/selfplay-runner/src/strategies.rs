use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use twenty48_core::Direction;

/// How the runner picks the next direction to try.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum StrategyKind {
    /// Try the four directions in a freshly shuffled order each step.
    #[default]
    Random,
    /// Rotate through Up, Left, Down, Right.
    Cycle,
}

const ROTATION: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Directions to attempt for one step, most preferred first.
///
/// The engine's boolean `make_move` return decides which attempt sticks, so
/// a strategy only proposes an order; it never needs legality up front.
pub fn direction_order(kind: StrategyKind, step: u64, rng: &mut StdRng) -> [Direction; 4] {
    match kind {
        StrategyKind::Random => {
            let mut order = Direction::ALL;
            order.shuffle(rng);
            order
        }
        StrategyKind::Cycle => {
            let start = (step % 4) as usize;
            [
                ROTATION[start],
                ROTATION[(start + 1) % 4],
                ROTATION[(start + 2) % 4],
                ROTATION[(start + 3) % 4],
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn cycle_rotates_through_all_directions() {
        let mut rng = StdRng::seed_from_u64(0);
        let firsts: Vec<Direction> = (0..4)
            .map(|step| direction_order(StrategyKind::Cycle, step, &mut rng)[0])
            .collect();
        assert_eq!(firsts, ROTATION.to_vec());
    }

    #[test]
    fn every_order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        for step in 0..20 {
            for kind in [StrategyKind::Random, StrategyKind::Cycle] {
                let order = direction_order(kind, step, &mut rng);
                for direction in Direction::ALL {
                    assert!(order.contains(&direction));
                }
            }
        }
    }
}
