//! Chart layout for the sentiment distribution.
//!
//! Geometry is computed here and handed to the SVG templates, which only
//! place the precomputed shapes.

use serde::Serialize;
use std::f64::consts::PI;

use crate::domain::report::SentimentDistribution;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];
const BAR_COLOR: &str = "#4c78a8";

/// Distance of the percentage labels from the centre, relative to the radius
const PCT_DISTANCE: f64 = 0.6;
/// Distance of the sentiment labels from the centre, relative to the radius
const LABEL_DISTANCE: f64 = 1.1;
const START_ANGLE: f64 = 90.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Centre of the bar, used for the category label
    pub center: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub value: usize,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub baseline: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
}

impl BarChart {
    pub const WIDTH: f64 = 640.0;
    pub const HEIGHT: f64 = 360.0;

    pub fn layout(distribution: &SentimentDistribution) -> Self {
        let (left, right, top, bottom) = (56.0, 16.0, 16.0, 48.0);
        let plot_width = Self::WIDTH - left - right;
        let plot_height = Self::HEIGHT - top - bottom;
        let baseline = top + plot_height;

        let step = tick_step(distribution.max_count());
        let axis_max = (distribution.max_count().div_ceil(step) * step).max(step);

        let slot = plot_width / distribution.counts.len().max(1) as f64;
        let bar_width = slot * 0.6;

        let bars = distribution
            .counts
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let height = plot_height * entry.count as f64 / axis_max as f64;
                let x = left + slot * index as f64 + (slot - bar_width) / 2.0;
                Bar {
                    label: entry.sentiment.to_string(),
                    count: entry.count,
                    x: round2(x),
                    y: round2(baseline - height),
                    width: round2(bar_width),
                    height: round2(height),
                    center: round2(x + bar_width / 2.0),
                    color: BAR_COLOR,
                }
            })
            .collect();

        let ticks = (0..=axis_max)
            .step_by(step)
            .map(|value| Tick {
                value,
                y: round2(baseline - plot_height * value as f64 / axis_max as f64),
            })
            .collect();

        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            left,
            top,
            plot_width,
            plot_height,
            baseline,
            bars,
            ticks,
        }
    }
}

/// Integer tick spacing giving at most five intervals
fn tick_step(max: usize) -> usize {
    if max <= 5 {
        return 1;
    }
    let raw = max.div_ceil(5);
    let magnitude = 10usize.pow((raw as f64).log10().floor() as u32);
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= raw)
        .unwrap_or(raw)
}

#[derive(Debug, Clone, Serialize)]
pub struct Slice {
    pub label: String,
    pub percentage: String,
    pub color: &'static str,
    /// SVG path of the wedge, empty when the slice is the whole pie
    pub path: String,
    pub label_x: f64,
    pub label_y: f64,
    pub anchor: &'static str,
    pub pct_x: f64,
    pub pct_y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub const WIDTH: f64 = 480.0;
    pub const HEIGHT: f64 = 400.0;

    /// Wedges start at 12 o'clock and run counter-clockwise in distribution order
    pub fn layout(distribution: &SentimentDistribution) -> Self {
        let (cx, cy, radius) = (Self::WIDTH / 2.0, Self::HEIGHT / 2.0, 150.0);
        let total = distribution.total.max(1) as f64;
        let point = |degrees: f64, distance: f64| {
            let theta = degrees * PI / 180.0;
            (
                cx + distance * theta.cos(),
                // screen y grows downwards
                cy - distance * theta.sin(),
            )
        };

        let mut start = START_ANGLE;
        let mut slices = Vec::with_capacity(distribution.counts.len());

        for (index, entry) in distribution.counts.iter().enumerate() {
            let sweep = 360.0 * entry.count as f64 / total;
            let end = start + sweep;
            let middle = (start + end) / 2.0;

            let path = if entry.count as f64 >= total {
                String::new()
            } else {
                let (x1, y1) = point(start, radius);
                let (x2, y2) = point(end, radius);
                let large_arc = if sweep > 180.0 { 1 } else { 0 };
                // sweep flag 0 draws counter-clockwise on screen
                format!(
                    "M {} {} L {} {} A {} {} 0 {} 0 {} {} Z",
                    round2(cx),
                    round2(cy),
                    round2(x1),
                    round2(y1),
                    radius,
                    radius,
                    large_arc,
                    round2(x2),
                    round2(y2)
                )
            };

            let (label_x, label_y) = point(middle, radius * LABEL_DISTANCE);
            let (pct_x, pct_y) = point(middle, radius * PCT_DISTANCE);
            let anchor = if label_x > cx + 0.5 {
                "start"
            } else if label_x < cx - 0.5 {
                "end"
            } else {
                "middle"
            };

            slices.push(Slice {
                label: entry.sentiment.to_string(),
                percentage: entry.percentage_label(),
                color: PALETTE[index % PALETTE.len()],
                path,
                label_x: round2(label_x),
                label_y: round2(label_y),
                anchor,
                pct_x: round2(pct_x),
                pct_y: round2(pct_y),
            });
            start = end;
        }

        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            cx,
            cy,
            radius,
            slices,
        }
    }
}
