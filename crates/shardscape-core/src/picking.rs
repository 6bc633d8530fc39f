//! Ray hit testing against crystal centers

use glam::Vec3;

/// Distance along the ray to the point closest to `center`, when that point
/// lies in front of the origin and within `radius` of `center`
pub fn ray_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let direction = direction.try_normalize()?;
    let t = (center - origin).dot(direction);
    if t < 0.0 {
        return None;
    }

    let closest = origin + direction * t;
    if (closest - center).length_squared() < radius * radius {
        Some(t)
    } else {
        None
    }
}

/// Nearest target hit by the ray
pub fn nearest_hit<T: Copy>(
    origin: Vec3,
    direction: Vec3,
    radius: f32,
    targets: impl IntoIterator<Item = (T, Vec3)>,
) -> Option<T> {
    let mut closest: Option<(f32, T)> = None;
    for (target, center) in targets {
        let Some(t) = ray_hit(origin, direction, center, radius) else {
            continue;
        };
        if closest.map_or(true, |(best, _)| t < best) {
            closest = Some((t, target));
        }
    }
    closest.map(|(_, target)| target)
}
