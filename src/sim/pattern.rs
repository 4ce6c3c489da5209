//! Solid/gap activation patterns
//!
//! A pattern always starts and ends solid and never has two gaps side by
//! side. Gaps only become possible once `max_run` solid tiles have gone by.

use rand::Rng;

use crate::consts::GAP_CHANCE;

/// Generate a fresh pattern of `length` slots (true = solid)
pub fn generate<R: Rng + ?Sized>(length: usize, max_run: usize, rng: &mut R) -> Vec<bool> {
    let mut pattern = Vec::with_capacity(length);
    generate_into(&mut pattern, length, max_run, rng);
    pattern
}

/// Refill `pattern` in place, reusing its allocation
pub fn generate_into<R: Rng + ?Sized>(
    pattern: &mut Vec<bool>,
    length: usize,
    max_run: usize,
    rng: &mut R,
) {
    pattern.clear();
    if length == 0 {
        return;
    }

    // Slot 0 is solid and starts the first run
    pattern.push(true);
    let mut run = 1;
    for _ in 1..length.saturating_sub(1) {
        if run >= max_run && rng.random_bool(GAP_CHANCE) {
            pattern.push(false);
            run = 0;
        } else {
            pattern.push(true);
            run += 1;
        }
    }
    if length > 1 {
        pattern.push(true);
    }

    repair(pattern);
}

/// Force both neighbours of every gap solid. Later gaps of an adjacent
/// pair are removed rather than the earlier one.
fn repair(pattern: &mut [bool]) {
    for i in 0..pattern.len() {
        if !pattern[i] {
            if i > 0 {
                pattern[i - 1] = true;
            }
            if i + 1 < pattern.len() {
                pattern[i + 1] = true;
            }
        }
    }
}

/// True if `pattern` holds every structural rule
pub fn is_well_formed(pattern: &[bool]) -> bool {
    let bounds = pattern.first().copied().unwrap_or(true) && pattern.last().copied().unwrap_or(true);
    bounds && !pattern.windows(2).any(|w| !w[0] && !w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_short_patterns() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate(0, 1, &mut rng).is_empty());
        assert_eq!(generate(1, 1, &mut rng), vec![true]);
        assert_eq!(generate(2, 0, &mut rng), vec![true, true]);
    }

    #[test]
    fn test_pool_sized_pattern() {
        // 20 slots, gap allowed after every solid tile
        let mut any_gap = false;
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pattern = generate(20, 1, &mut rng);
            assert_eq!(pattern.len(), 20);
            assert!(pattern[0] && pattern[19]);
            assert!(is_well_formed(&pattern), "seed {seed}: {pattern:?}");
            any_gap |= pattern.contains(&false);
        }
        assert!(any_gap);
    }

    #[test]
    fn test_zero_run_is_repaired() {
        // Every interior slot may roll a gap, so adjacent gaps get generated
        // and must be repaired away
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pattern = generate(50, 0, &mut rng);
            assert!(is_well_formed(&pattern), "seed {seed}: {pattern:?}");
        }
    }

    #[test]
    fn test_run_length_respected() {
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pattern = generate(40, 4, &mut rng);
            let mut run = 0;
            for &solid in &pattern {
                if solid {
                    run += 1;
                } else {
                    assert!(run >= 4, "gap after only {run} solid tiles");
                    run = 0;
                }
            }
        }
    }

    #[test]
    fn test_generate_into_reuses_buffer() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut buf = Vec::with_capacity(16);
        generate_into(&mut buf, 16, 2, &mut rng);
        let cap = buf.capacity();
        generate_into(&mut buf, 16, 2, &mut rng);
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let a = generate(30, 2, &mut Pcg32::seed_from_u64(42));
        let b = generate(30, 2, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn pattern_is_always_well_formed(seed in any::<u64>(), length in 2usize..200, max_run in 0usize..8) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pattern = generate(length, max_run, &mut rng);
            prop_assert_eq!(pattern.len(), length);
            prop_assert!(pattern[0]);
            prop_assert!(pattern[length - 1]);
            prop_assert!(is_well_formed(&pattern));
        }
    }
}
