use chess::ChessMove;
use rand::Rng;

/// Picks one of `moves` uniformly at random. That is the whole opponent.
pub fn pick_random_move<R: Rng + ?Sized>(moves: &[ChessMove], rng: &mut R) -> Option<ChessMove> {
    if moves.is_empty() {
        return None;
    }
    let index = rng.random_range(0..moves.len());
    moves.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::{ChessEngine, RulesEngine};
    use chess::Square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn no_moves_means_no_pick() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_random_move(&[], &mut rng), None);
    }

    #[test]
    fn single_legal_move_is_always_chosen() {
        let engine = ChessEngine::from_fen("7k/p7/6Q1/P7/8/8/8/1K6 b - - 0 1").unwrap();
        let moves = engine.legal_moves();
        assert_eq!(moves, vec![ChessMove::new(Square::A7, Square::A6, None)]);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(pick_random_move(&moves, &mut rng), Some(moves[0]));
        }
    }

    #[test]
    fn picks_are_roughly_uniform() {
        let moves = ChessEngine::new().legal_moves();
        let k = moves.len();
        let trials = 20_000;
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts: HashMap<ChessMove, usize> = HashMap::new();
        for _ in 0..trials {
            let mv = pick_random_move(&moves, &mut rng).unwrap();
            *counts.entry(mv).or_default() += 1;
        }

        assert_eq!(counts.len(), k);
        let expected = 1.0 / k as f64;
        for count in counts.values() {
            let freq = *count as f64 / trials as f64;
            assert!(
                (freq - expected).abs() < 0.015,
                "frequency {} too far from {}",
                freq,
                expected
            );
        }
    }
}
