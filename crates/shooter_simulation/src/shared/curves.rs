//! Piecewise-linear keyframe кривые
//!
//! Заменяют curve-ассеты: Z-подъём при интерполяции, scale, pulse/glow каналы,
//! slide пистолета. Вне диапазона ключей значение clamp'ится к крайним.

use bevy::prelude::*;

/// Скалярная кривая (time → value)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloatCurve {
    keys: Vec<(f32, f32)>,
}

impl FloatCurve {
    /// Ключи сортируются по времени
    pub fn new(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// Пустая кривая → 0.0
    pub fn sample(&self, time: f32) -> f32 {
        let Some(&(first_time, first_value)) = self.keys.first() else {
            return 0.0;
        };
        if time <= first_time {
            return first_value;
        }

        for window in self.keys.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if time <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                return v0 + (v1 - v0) * ((time - t0) / span);
            }
        }

        self.keys.last().map(|&(_, value)| value).unwrap_or(0.0)
    }

    /// Время последнего ключа
    pub fn duration(&self) -> f32 {
        self.keys.last().map(|&(time, _)| time).unwrap_or(0.0)
    }
}

/// Векторная кривая (3 канала, например glow / fresnel exponent / reflect fraction)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorCurve {
    keys: Vec<(f32, Vec3)>,
}

impl VectorCurve {
    pub fn new(mut keys: Vec<(f32, Vec3)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    pub fn sample(&self, time: f32) -> Vec3 {
        let Some(&(first_time, first_value)) = self.keys.first() else {
            return Vec3::ZERO;
        };
        if time <= first_time {
            return first_value;
        }

        for window in self.keys.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if time <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                return v0.lerp(v1, (time - t0) / span);
            }
        }

        self.keys.last().map(|&(_, value)| value).unwrap_or(Vec3::ZERO)
    }

    pub fn duration(&self) -> f32 {
        self.keys.last().map(|&(time, _)| time).unwrap_or(0.0)
    }
}

/// Набор кривых геймплея (вместо curve-ассетов)
///
/// Длины кривых совпадают с таймерами из `ShooterConfig` по умолчанию:
/// item Z/scale/interp pulse = 0.7s, pulse = 5s, slide = 0.2s.
#[derive(Resource, Debug, Clone)]
pub struct ShooterCurves {
    /// Доля пути по вертикали к точке интерполяции (0 → 1, с горкой)
    pub item_z: FloatCurve,
    /// Uniform scale во время интерполяции (`None` = scale не трогаем)
    pub item_scale: Option<FloatCurve>,
    /// Glow / fresnel exponent / fresnel reflect fraction в Pickup состоянии
    pub pulse: VectorCurve,
    /// Те же каналы во время интерполяции
    pub interp_pulse: VectorCurve,
    /// Slide пистолета (0 → 1 → 0)
    pub slide: FloatCurve,
}

impl Default for ShooterCurves {
    fn default() -> Self {
        Self {
            item_z: FloatCurve::new(vec![(0.0, 0.0), (0.3, 1.6), (0.7, 1.0)]),
            item_scale: Some(FloatCurve::new(vec![(0.0, 1.0), (0.35, 1.3), (0.7, 0.8)])),
            pulse: VectorCurve::new(vec![
                (0.0, Vec3::new(0.2, 1.0, 1.0)),
                (2.5, Vec3::new(1.0, 0.5, 0.25)),
                (5.0, Vec3::new(0.2, 1.0, 1.0)),
            ]),
            interp_pulse: VectorCurve::new(vec![
                (0.0, Vec3::new(1.0, 1.0, 1.0)),
                (0.7, Vec3::new(3.0, 0.2, 0.1)),
            ]),
            slide: FloatCurve::new(vec![(0.0, 0.0), (0.1, 1.0), (0.2, 0.0)]),
        }
    }
}
