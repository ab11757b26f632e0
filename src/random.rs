use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::{StdRng, ThreadRng};

/// Source of the record's random field.
pub trait RandomSource {
    /// Draws uniformly from the closed range `[low, high]`.
    fn draw_inclusive(&mut self, low: u32, high: u32) -> u32;
}

fn ordered(low: u32, high: u32) -> (u32, u32) {
    if low <= high { (low, high) } else { (high, low) }
}

macro_rules! rng_random_source {
    ($($rng:ty),+ $(,)?) => {
        $(
            impl RandomSource for $rng {
                fn draw_inclusive(&mut self, low: u32, high: u32) -> u32 {
                    let (low, high) = ordered(low, high);
                    match Uniform::new_inclusive(low, high) {
                        Ok(dist) => dist.sample(self),
                        Err(_) => low,
                    }
                }
            }
        )+
    };
}

rng_random_source!(ThreadRng, StdRng);

/// Always yields the same value, clamped into the requested range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn draw_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = ordered(low, high);
        self.0.clamp(low, high)
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn thread_local() -> ThreadRng {
    rand::rng()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat_the_same_sequence() {
        let mut first = seeded(42);
        let mut second = seeded(42);
        let left: Vec<u32> = (0..16).map(|_| first.draw_inclusive(0, 9999)).collect();
        let right: Vec<u32> = (0..16).map(|_| second.draw_inclusive(0, 9999)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn draws_stay_inside_the_closed_range() {
        let mut rng = thread_local();
        for _ in 0..2_000 {
            let value = rng.draw_inclusive(0, 9999);
            assert!(value <= 9999, "value out of range: {value}");
        }
        let mut rng = seeded(7);
        for _ in 0..200 {
            assert_eq!(rng.draw_inclusive(5, 5), 5);
        }
    }

    #[test]
    fn reversed_bounds_are_reordered() {
        let mut rng = seeded(1);
        for _ in 0..200 {
            let value = rng.draw_inclusive(20, 10);
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn fixed_source_clamps_into_range() {
        assert_eq!(FixedRandom(4821).draw_inclusive(0, 9999), 4821);
        assert_eq!(FixedRandom(20_000).draw_inclusive(0, 9999), 9999);
        assert_eq!(FixedRandom(3).draw_inclusive(10, 20), 10);
    }
}
