//! Frame-rate independent interpolation helpers

use bevy::prelude::*;

/// Exponential smoothing к target
///
/// Каждый кадр закрывает долю `delta * speed` (clamp 0..1) оставшегося расстояния.
/// Когда разница пренебрежимо мала, возвращает target (без бесконечного хвоста).
/// `speed <= 0` → мгновенно target.
pub fn interp_to(current: f32, target: f32, delta: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < 1.0e-8 {
        return target;
    }

    let step = (delta * speed).clamp(0.0, 1.0);
    current + distance * step
}

/// Линейное отображение `value` из `input` в `output` с clamp
pub fn map_range_clamped(input: (f32, f32), output: (f32, f32), value: f32) -> f32 {
    let span = input.1 - input.0;
    if span.abs() <= f32::EPSILON {
        return output.0;
    }

    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * t
}

/// Yaw (радианы, вокруг +Y) из rotation
pub fn yaw_of(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::YXZ).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_to_moves_fraction() {
        // 0.1s * 5/s = 50% расстояния
        let value = interp_to(0.0, 10.0, 0.1, 5.0);
        assert!((value - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_interp_to_never_overshoots() {
        // delta * speed > 1 → clamp, приходим ровно в target
        assert_eq!(interp_to(0.0, 10.0, 1.0, 30.0), 10.0);
        assert_eq!(interp_to(3.0, -2.0, 0.5, 0.0), -2.0);
    }

    #[test]
    fn test_interp_to_snaps_when_close() {
        assert_eq!(interp_to(9.99999, 10.0, 0.016, 1.0), 10.0);
    }

    #[test]
    fn test_map_range_clamped() {
        assert_eq!(map_range_clamped((0.0, 600.0), (0.0, 1.0), 300.0), 0.5);
        assert_eq!(map_range_clamped((0.0, 600.0), (0.0, 1.0), 1200.0), 1.0);
        assert_eq!(map_range_clamped((0.0, 600.0), (0.0, 1.0), -5.0), 0.0);
    }

    #[test]
    fn test_yaw_roundtrip() {
        let yaw = 0.75;
        assert!((yaw_of(Quat::from_rotation_y(yaw)) - yaw).abs() < 1e-5);
    }
}
