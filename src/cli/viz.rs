//! Terminal visualization using braille graphics
//!
//! Draws an X̄ control chart with Unicode braille characters: the sample
//! polyline, dashed UCL/LCL/mean reference lines and crosses on points that
//! fall outside the control limits.

use drawille::Canvas;

use crate::cli::helpers::{format_limit, format_value};
use crate::core::stats::mean;
use crate::entities::limits::LimitSet;

/// Default canvas size in braille pixels (2x4 per character)
pub const CHART_WIDTH: u32 = 120;
pub const CHART_HEIGHT: u32 = 40;

/// Which control limit a point crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBreach {
    AboveUcl,
    BelowLcl,
}

impl std::fmt::Display for ControlBreach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlBreach::AboveUcl => write!(f, "above UCL"),
            ControlBreach::BelowLcl => write!(f, "below LCL"),
        }
    }
}

/// A sample outside the control limits, with its 1-based index
#[derive(Debug, Clone, PartialEq)]
pub struct OutOfControl {
    pub index: usize,
    pub value: f64,
    pub breach: ControlBreach,
}

/// Samples strictly above UCL or strictly below LCL
pub fn out_of_control(samples: &[f64], limits: &LimitSet) -> Vec<OutOfControl> {
    samples
        .iter()
        .enumerate()
        .filter_map(|(i, &value)| {
            let breach = match (limits.ucl, limits.lcl) {
                (Some(ucl), _) if value > ucl => ControlBreach::AboveUcl,
                (_, Some(lcl)) if value < lcl => ControlBreach::BelowLcl,
                _ => return None,
            };
            Some(OutOfControl {
                index: i + 1,
                value,
                breach,
            })
        })
        .collect()
}

/// Vertical scale shared by every element of the chart
struct Scale {
    min: f64,
    max: f64,
    height: u32,
}

impl Scale {
    /// Fit all values plus zero, with a little headroom
    fn fit(values: impl Iterator<Item = f64>, height: u32) -> Self {
        let (mut min, mut max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        let pad = (max - min) * 0.05;
        if max > 0.0 {
            max += pad;
        }
        if min < 0.0 {
            min -= pad;
        }
        Self { min, max, height }
    }

    fn y(&self, value: f64) -> u32 {
        let top = (self.height - 1) as f64;
        let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (top - ratio * top).round() as u32
    }
}

fn dashed_line(canvas: &mut Canvas, y: u32, width: u32) {
    for x in (0..width).step_by(6) {
        for dx in 0..3 {
            if x + dx < width {
                canvas.set(x + dx, y);
            }
        }
    }
}

fn cross(canvas: &mut Canvas, x: u32, y: u32) {
    canvas.set(x, y);
    canvas.set(x + 1, y);
    canvas.set(x, y + 1);
    canvas.set(x.saturating_sub(1), y);
    canvas.set(x, y.saturating_sub(1));
}

/// Render an X̄ control chart for `samples`
///
/// # Example Output
/// ```text
/// X̄ Values (5 samples)
/// ⠉⠉⠁⠀⠈⠉⠉⠀⠀⢀⠔⠊⠉⠉⠁⠀⠈⠉⠉
/// ⠤⠤⠄⠠⠤⠔⠊⠤⠤⠊⠀⠀⠀⠀⠠⠤⠤⠀⠠
/// ...
///   UCL=20  Mean=13  LCL=2  (y axis from 0 to 26.25)
/// ```
pub fn render_control_chart(samples: &[f64], limits: &LimitSet, width: u32, height: u32) -> String {
    if samples.is_empty() {
        return "No samples to chart".to_string();
    }

    let center = mean(samples);
    let scale = Scale::fit(
        samples
            .iter()
            .copied()
            .chain(limits.ucl)
            .chain(limits.lcl)
            .chain(std::iter::once(center)),
        height,
    );

    let mut canvas = Canvas::new(width, height);

    for limit in [limits.ucl, limits.lcl, Some(center)].into_iter().flatten() {
        dashed_line(&mut canvas, scale.y(limit), width);
    }

    let x_of = |i: usize| -> u32 {
        if samples.len() == 1 {
            width / 2
        } else {
            ((i as f64) * (width - 1) as f64 / (samples.len() - 1) as f64).round() as u32
        }
    };

    let points: Vec<(u32, u32)> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| (x_of(i), scale.y(v)))
        .collect();

    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        canvas.line(x1, y1, x2, y2);
    }
    if let [(x, y)] = points.as_slice() {
        canvas.set(*x, *y);
    }

    let flagged = out_of_control(samples, limits);
    for point in &flagged {
        let (x, y) = points[point.index - 1];
        cross(&mut canvas, x, y);
    }

    let mut output = String::new();
    output.push_str(&format!("X̄ Values ({} samples)\n", samples.len()));
    output.push_str(&canvas.frame());
    output.push_str(&format!(
        "\n  UCL={}  Mean={}  LCL={}  (y axis from {} to {})",
        format_limit(limits.ucl),
        format_value(center),
        format_limit(limits.lcl),
        format_value(scale.min),
        format_value(scale.max),
    ));

    if flagged.is_empty() {
        output.push_str("\n  All samples within control limits");
    } else {
        output.push_str("\n  Out of control:");
        for point in &flagged {
            output.push_str(&format!(
                "\n    Sample {} ({}) {}",
                point.index,
                format_value(point.value),
                point.breach
            ));
        }
    }

    output
}
