//! Spawn placement
//!
//! Rocks and slimes are dropped at random spots inside the map. A spot is
//! rejected if the new box comes within the spawn margin of anything
//! already placed, and sampling repeats until one is accepted.
//! `GameConfig::validate` guarantees the map has room, so the loop ends.

use macroquad::logging::debug;
use macroquad::math::Vec2;
use rand::Rng;

use super::collision::in_proximity;
use super::geometry::Bounds;
use super::movement::MapLimits;

/// Uniform sample in `[lo, hi]`; `lo` if the range is empty
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// True if `candidate` keeps at least `margin` away from every box in
/// `occupied`. Both argument orders are checked.
pub fn is_clear(candidate: &Bounds, occupied: &[Bounds], margin: f32) -> bool {
    occupied
        .iter()
        .all(|other| !in_proximity(candidate, other, margin) && !in_proximity(other, candidate, margin))
}

/// Pick a top-left position for a `width × height` box inside `limits`
/// that is clear of `occupied`.
pub fn find_free_spot<R: Rng>(
    rng: &mut R,
    width: f32,
    height: f32,
    limits: &MapLimits,
    occupied: &[Bounds],
    margin: f32,
) -> Vec2 {
    let mut attempts: u64 = 0;
    loop {
        let x = sample(rng, limits.left, limits.right - width);
        let y = sample(rng, limits.top, limits.bottom - height);
        let candidate = Bounds::new(x, y, width, height);
        attempts += 1;

        if is_clear(&candidate, occupied, margin) {
            if attempts > 100 {
                debug!("spawn placement took {} attempts", attempts);
            }
            return Vec2::new(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_is_clear() {
        let occupied = [Bounds::new(100.0, 100.0, 32.0, 32.0)];
        // 5px gap to the left of the occupied box
        let left = Bounds::new(63.0, 100.0, 32.0, 32.0);
        assert!(is_clear(&left, &occupied, 2.0));
        assert!(!is_clear(&left, &occupied, 10.0));
        assert!(is_clear(&left, &[], 10.0));
    }

    #[test]
    fn test_spots_stay_in_map_and_apart() {
        let mut rng = StdRng::seed_from_u64(42);
        let limits = MapLimits::from_canvas(840.0, 560.0, 10.0);
        let mut occupied = vec![Bounds::new(404.0, 264.0, 32.0, 32.0)];

        for _ in 0..13 {
            let spot = find_free_spot(&mut rng, 32.0, 32.0, &limits, &occupied, 10.0);
            let placed = Bounds::new(spot.x, spot.y, 32.0, 32.0);
            assert!(limits.contains(&placed));
            assert!(is_clear(&placed, &occupied, 10.0));
            occupied.push(placed);
        }
    }

    #[test]
    fn test_exact_fit_has_one_spot() {
        let mut rng = StdRng::seed_from_u64(1);
        let limits = MapLimits::from_canvas(52.0, 52.0, 10.0);
        let spot = find_free_spot(&mut rng, 32.0, 32.0, &limits, &[], 10.0);
        assert_eq!(spot, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let limits = MapLimits::from_canvas(840.0, 560.0, 10.0);
        let place = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            find_free_spot(&mut rng, 32.0, 32.0, &limits, &[], 10.0)
        };
        assert_eq!(place(9), place(9));
    }
}
