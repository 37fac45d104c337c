use crate::foundation::error::{ChartError, ChartResult};

pub use kurbo::{Point, Rect};

/// 0-based position of a frame in the interpolated table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ChartResult<Self> {
        if den == 0 {
            return Err(ChartError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ChartError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate for `steps_per_period` frames spread over `period_length_ms` milliseconds.
    ///
    /// Equals `1000 / period_length_ms * steps_per_period`, kept exact as a reduced fraction.
    pub fn from_period(steps_per_period: u32, period_length_ms: u32) -> ChartResult<Self> {
        let num = u64::from(steps_per_period) * 1000;
        let den = u64::from(period_length_ms);
        if num == 0 || den == 0 {
            return Err(ChartError::config(
                "steps_per_period and period_length must be > 0",
            ));
        }
        let g = gcd(num, den);
        let num = u32::try_from(num / g)
            .map_err(|_| ChartError::config("frame rate numerator overflows u32"))?;
        let den = u32::try_from(den / g)
            .map_err(|_| ChartError::config("frame rate denominator overflows u32"))?;
        Self::new(num, den)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_interval_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas for a figure of `width_in x height_in` inches at `dpi`.
    ///
    /// Both sides are rounded up to an even pixel count (yuv420p encoders reject odd sizes).
    pub fn from_figure(width_in: f64, height_in: f64, dpi: f64) -> ChartResult<Self> {
        fn side(inches: f64, dpi: f64) -> ChartResult<u32> {
            let px = (inches * dpi).ceil();
            if !px.is_finite() || px < 2.0 || px > f64::from(u16::MAX) {
                return Err(ChartError::config(format!(
                    "figure side of {inches}in at {dpi}dpi is out of range"
                )));
            }
            let px = px as u32;
            Ok(px + (px % 2))
        }

        Ok(Self {
            width: side(width_in, dpi)?,
            height: side(height_in, dpi)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
