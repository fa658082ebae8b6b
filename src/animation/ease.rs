//! Timing curves for stroke reveals, named after the CSS transition keywords.
//!
//! Every curve except [`Ease::Linear`] is a unit cubic Bézier from `(0, 0)` to `(1, 1)`; progress
//! along the time axis is solved for the curve parameter before sampling the output axis.

/// Timing curve applied to normalized reveal progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed. Stroke order diagrams use it so every stroke draws at pen speed.
    #[default]
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    #[serde(alias = "ease-in")]
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`.
    #[serde(alias = "ease-out")]
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[serde(alias = "ease-in-out")]
    EaseInOut,
}

impl Ease {
    /// Inner control points `(x1, y1, x2, y2)`, or `None` for [`Ease::Linear`].
    pub fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => None,
            Self::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
        }
    }

    /// Map reveal progress `t` (clamped to `[0, 1]`, NaN as `0`) to drawn fraction.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.control_points() {
            None => t,
            Some([x1, y1, x2, y2]) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                bezier(y1, y2, solve_param(x1, x2, t))
            }
        }
    }
}

/// One axis of a unit cubic Bézier with inner control values `p1`, `p2` at parameter `s`.
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let r = 1.0 - s;
    3.0 * r * r * s * p1 + 3.0 * r * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let r = 1.0 - s;
    3.0 * r * r * p1 + 6.0 * r * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Curve parameter whose x coordinate is `x`. Newton steps first, bisection if the slope flattens.
fn solve_param(x1: f64, x2: f64, x: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < EPS {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
        if !(0.0..=1.0).contains(&s) {
            break;
        }
    }

    // x(s) is monotonic on [0, 1] for control x values inside [0, 1].
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier(x1, x2, s);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
