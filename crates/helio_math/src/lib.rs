// Re-export glam for convenience
pub use glam::*;

mod interval;
pub use interval::Interval;

mod ray;
pub use ray::Ray;

/// Normalize a vector, with explicit handling of the degenerate cases.
///
/// A zero-length vector stays zero rather than producing NaNs, and a vector
/// whose length is exactly 1.0 is returned unchanged since the division
/// would be a no-op.
pub fn normalized(v: Vec3) -> Vec3 {
    let magnitude = v.length();
    if magnitude == 0.0 {
        Vec3::ZERO
    } else if magnitude == 1.0 {
        v
    } else {
        v / magnitude
    }
}
