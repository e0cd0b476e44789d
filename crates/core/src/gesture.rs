//! Gesture resolver - maps a drag vector to a swap direction.
//!
//! Pointer space is y-up. The circle is split into four 90° sectors centred on
//! the cardinal axes; each sector is closed on its lower edge and open on its
//! upper edge:
//!
//! | Sector | Direction |
//! |--------|-----------|
//! | `[315, 360) ∪ [0, 45)` | Right |
//! | `[45, 135)` | Up |
//! | `[135, 225)` | Left |
//! | `[225, 315)` | Down |

use crate::types::{Direction, Vec2};

/// Result of classifying a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Shorter than the drag threshold (a tap or an aborted drag)
    Tap,
    /// Long enough to count as a directional swipe
    Swipe(Direction),
}

/// `|delta| >= threshold`
#[inline]
pub fn passes_threshold(delta: Vec2, threshold: f32) -> bool {
    delta.length() >= threshold
}

/// Angle of `delta` in degrees, normalised to `[0, 360)`
pub fn angle_degrees(delta: Vec2) -> f32 {
    let mut deg = delta.y.atan2(delta.x).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    // -tiny + 360 can round up to exactly 360 in f32.
    if deg >= 360.0 {
        deg -= 360.0;
    }
    deg
}

/// Bucket a normalised angle (degrees, `[0, 360)`) into a direction
///
/// # Examples
///
/// ```
/// use tui_gems_core::gesture::direction_for_angle;
/// use tui_gems_core::types::Direction;
///
/// assert_eq!(direction_for_angle(44.9), Direction::Right);
/// assert_eq!(direction_for_angle(45.0), Direction::Up);
/// assert_eq!(direction_for_angle(315.0), Direction::Right);
/// ```
pub fn direction_for_angle(deg: f32) -> Direction {
    if deg < 45.0 || deg >= 315.0 {
        Direction::Right
    } else if deg < 135.0 {
        Direction::Up
    } else if deg < 225.0 {
        Direction::Left
    } else {
        Direction::Down
    }
}

/// Resolve a drag vector to a direction
///
/// Callers must have applied [`passes_threshold`] first; a zero vector is not a
/// meaningful input (it would resolve to `Right`).
pub fn resolve_direction(delta: Vec2) -> Direction {
    direction_for_angle(angle_degrees(delta))
}

/// Apply the threshold gate and resolve the direction in one step
pub fn classify(delta: Vec2, threshold: f32) -> Gesture {
    if delta == Vec2::ZERO || !passes_threshold(delta, threshold) {
        return Gesture::Tap;
    }
    Gesture::Swipe(resolve_direction(delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_vectors() {
        assert_eq!(resolve_direction(Vec2::new(1.0, 0.0)), Direction::Right);
        assert_eq!(resolve_direction(Vec2::new(0.0, 1.0)), Direction::Up);
        assert_eq!(resolve_direction(Vec2::new(-1.0, 0.0)), Direction::Left);
        assert_eq!(resolve_direction(Vec2::new(0.0, -1.0)), Direction::Down);
    }

    #[test]
    fn angle_is_normalised() {
        assert_eq!(angle_degrees(Vec2::new(1.0, 0.0)), 0.0);
        let down = angle_degrees(Vec2::new(0.0, -1.0));
        assert!((down - 270.0).abs() < 1e-3, "got {}", down);
        let a = angle_degrees(Vec2::new(1.0, -1e-9));
        assert!((0.0..360.0).contains(&a), "got {}", a);
    }

    #[test]
    fn classify_zero_vector_is_tap() {
        assert_eq!(classify(Vec2::ZERO, 0.0), Gesture::Tap);
    }

    #[test]
    fn classify_threshold_boundary() {
        assert_eq!(classify(Vec2::new(29.99, 0.0), 30.0), Gesture::Tap);
        assert_eq!(
            classify(Vec2::new(30.0, 0.0), 30.0),
            Gesture::Swipe(Direction::Right)
        );
        assert_eq!(
            classify(Vec2::new(0.0, -45.0), 30.0),
            Gesture::Swipe(Direction::Down)
        );
    }

    #[test]
    fn diagonal_drags_favour_lower_edge_sector() {
        // Exactly 135° belongs to Left, 225° to Down.
        assert_eq!(direction_for_angle(135.0), Direction::Left);
        assert_eq!(direction_for_angle(225.0), Direction::Down);
        assert_eq!(direction_for_angle(134.999), Direction::Up);
    }
}
