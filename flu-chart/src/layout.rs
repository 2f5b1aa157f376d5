//! Chart geometry: pixel layout, linear scales and axis ticks.

use flu_season::season::WEEK_OFFSET_DOMAIN;
use flu_utils::format::si_format;
use serde::{Deserialize, Serialize};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel layout of the season comparison chart. The right margin holds the
/// legend column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub legend_row_height: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 560.0,
            height: 240.0,
            margin: Margin {
                top: 16.0,
                right: 90.0,
                bottom: 32.0,
                left: 48.0,
            },
            legend_row_height: 12.0,
        }
    }
}

impl ChartLayout {
    /// Week offset to horizontal pixel position.
    pub fn x_scale(&self) -> LinearScale {
        LinearScale {
            domain: (
                *WEEK_OFFSET_DOMAIN.start() as f64,
                *WEEK_OFFSET_DOMAIN.end() as f64,
            ),
            range: (self.margin.left, self.width - self.margin.right),
        }
    }

    /// Case count to vertical pixel position; 0 sits on the bottom margin.
    pub fn y_scale(&self, y_max: f64) -> LinearScale {
        LinearScale {
            domain: (0.0, y_max),
            range: (self.height - self.margin.bottom, self.margin.top),
        }
    }

    /// Left edge of the legend column.
    pub fn legend_x(&self) -> f64 {
        self.width - self.margin.right + 6.0
    }

    pub fn legend_y(&self, row: usize) -> f64 {
        self.margin.top + row as f64 * self.legend_row_height
    }
}

/// Maps a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    /// A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// One labelled axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Week axis ticks labelled `W0`, `W5`, ...
pub fn week_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            value,
            position: scale.apply(value),
            label: format!("W{}", value),
        })
        .collect()
}

/// Case axis ticks labelled with two significant digits and an SI suffix.
pub fn case_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            value,
            position: scale.apply(value),
            label: si_format(value, 2),
        })
        .collect()
}

/// Roughly `count` evenly spaced round values between `start` and `stop`
/// (inclusive), spaced by 1, 2 or 5 times a power of ten. Produces the same
/// sequence as d3-array's `ticks`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let mut values: Vec<f64> = (i1..=i2)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count;
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        let mut i1 = round_half_up(start * scale);
        let mut i2 = round_half_up(stop * scale);
        if (i1 as f64) / scale < start {
            i1 += 1;
        }
        if (i2 as f64) / scale > stop {
            i2 -= 1;
        }
        (i1, i2, -scale)
    } else {
        let width = 10f64.powf(power) * factor;
        let mut i1 = round_half_up(start / width);
        let mut i2 = round_half_up(stop / width);
        if (i1 as f64) * width < start {
            i1 += 1;
        }
        if (i2 as f64) * width > stop {
            i2 -= 1;
        }
        (i1, i2, width)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
