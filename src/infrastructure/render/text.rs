//! Terminal chart rasterizer.
//!
//! Draws the theoretical trajectory as a dashed `·` line, the actual
//! capital as a `*` line, and a marker on every observed day: `+` at or
//! above the initial capital, `x` below it.

use std::io::Write;
use std::sync::Mutex;

use crate::domain::ports::chart_renderer::ChartRenderer;
use crate::domain::values::series::{ChartData, Marker, SeriesPoint};
use crate::presentation::money::format_money;

const THEORETICAL: char = '·';
const ACTUAL: char = '*';
const EMPTY: char = ' ';
const MAX_DAY_TICKS: u32 = 10;

pub struct TextChartRenderer<W: Write + Send> {
    out: Mutex<W>,
    width: usize,
    height: usize,
    currency: String,
}

impl<W: Write + Send> TextChartRenderer<W> {
    /// `width` and `height` are the plot area in characters, clamped to a
    /// usable minimum.
    pub fn new(out: W, width: usize, height: usize, currency: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(out),
            width: width.max(10),
            height: height.max(5),
            currency: currency.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn column(&self, day: f64, max_day: u32) -> usize {
        let ratio = day / max_day.max(1) as f64;
        (ratio * (self.width - 1) as f64).round().clamp(0.0, (self.width - 1) as f64) as usize
    }

    fn row(&self, capital: f64, chart: &ChartData) -> usize {
        let span = chart.bounds.max_capital - chart.bounds.min_capital;
        let ratio = if span > 0.0 {
            (chart.bounds.max_capital - capital) / span
        } else {
            0.5
        };
        (ratio * (self.height - 1) as f64).round().clamp(0.0, (self.height - 1) as f64) as usize
    }

    fn day_at(&self, col: usize, max_day: u32) -> f64 {
        col as f64 / (self.width - 1) as f64 * max_day.max(1) as f64
    }

    /// Evenly spaced day labels, at most [`MAX_DAY_TICKS`] intervals and
    /// never closer than one blank column apart.
    fn day_ticks(&self, max_day: u32) -> String {
        let digits = max_day.to_string().len();
        let fit = ((self.width - 1) / (digits + 1)).max(1) as u32;
        let steps = max_day.min(MAX_DAY_TICKS).min(fit).max(1);

        let mut line = vec![EMPTY; self.width + digits];
        let mut free_from = 0;
        for i in 0..=steps {
            let day = (max_day as f64 * i as f64 / steps as f64).round() as u32;
            let label = day.to_string();
            let start = self.column(day as f64, max_day);
            if start < free_from {
                continue;
            }
            for (cell, ch) in line[start..].iter_mut().zip(label.chars()) {
                *cell = ch;
            }
            free_from = start + label.len() + 1;
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }

    pub fn draw(&self, chart: &ChartData) -> String {
        if chart.is_empty() {
            return "No data to display\n".to_string();
        }

        let max_day = chart.bounds.max_day;
        let mut grid = vec![vec![EMPTY; self.width]; self.height];

        // Dashed: every other column.
        for col in (0..self.width).step_by(2) {
            if let Some(capital) = interpolate(&chart.theoretical, self.day_at(col, max_day)) {
                grid[self.row(capital, chart)][col] = THEORETICAL;
            }
        }

        for col in 0..self.width {
            if let Some(capital) = interpolate(&chart.actual, self.day_at(col, max_day)) {
                grid[self.row(capital, chart)][col] = ACTUAL;
            }
        }

        for point in &chart.actual {
            let glyph = match chart.marker(point) {
                Marker::Gain => '+',
                Marker::Loss => 'x',
            };
            grid[self.row(point.capital, chart)][self.column(point.day as f64, max_day)] = glyph;
        }

        let top = format_money(chart.bounds.max_capital, &self.currency);
        let bottom = format_money(chart.bounds.min_capital, &self.currency);
        let middle = format_money(
            (chart.bounds.max_capital + chart.bounds.min_capital) / 2.0,
            &self.currency,
        );
        let label_width = [&top, &bottom, &middle]
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        let target_row = self.row(chart.target_capital, chart);

        let mut out = String::new();
        for (i, cells) in grid.iter().enumerate() {
            let label = if i == 0 {
                top.as_str()
            } else if i == self.height - 1 {
                bottom.as_str()
            } else if i == (self.height - 1) / 2 {
                middle.as_str()
            } else {
                ""
            };
            let line: String = cells.iter().collect();
            out.push_str(&format!("{label:>label_width$} |{line}"));
            if i == target_row {
                out.push_str(" < target");
            }
            out.push('\n');
        }

        out.push_str(&format!("{:>label_width$} +{}\n", "", "-".repeat(self.width)));
        out.push_str(&format!(
            "{:>label_width$}  {}  days\n",
            "",
            self.day_ticks(max_day)
        ));
        out.push_str(&format!(
            "{ACTUAL} actual   {THEORETICAL} theoretical   + at/above initial   x below initial\n"
        ));
        out
    }
}

impl<W: Write + Send> ChartRenderer for TextChartRenderer<W> {
    fn render(&self, chart: &ChartData) {
        let text = self.draw(chart);
        let Ok(mut out) = self.out.lock() else {
            tracing::debug!("chart output unavailable, skipping render");
            return;
        };
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!(error = %e, "chart render failed, skipping");
        }
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Linear interpolation over a day-ordered series; `None` past either end.
fn interpolate(series: &[SeriesPoint], day: f64) -> Option<f64> {
    let first = series.first()?;
    if day < first.day as f64 {
        return None;
    }
    if series.len() == 1 {
        return (day == first.day as f64).then_some(first.capital);
    }
    series.windows(2).find_map(|w| {
        let (a, b) = (w[0], w[1]);
        let (da, db) = (a.day as f64, b.day as f64);
        if day >= da && day <= db {
            let t = if db > da { (day - da) / (db - da) } else { 0.0 };
            Some(a.capital + (b.capital - a.capital) * t)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::plan::{PlanConfig, PlanState};
    use chrono::Utc;
    use std::io;

    fn chart(capitals: &[f64]) -> ChartData {
        let mut state = PlanState::new(PlanConfig::new(1000.0, 2000.0, 10).unwrap(), Utc::now());
        for c in capitals {
            state.apply(*c, Utc::now()).unwrap();
        }
        ChartData::from_state(&state)
    }

    #[test]
    fn test_empty_chart_message() {
        let renderer = TextChartRenderer::new(Vec::new(), 40, 10, "Ar");
        renderer.render(&chart(&[]));
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "No data to display\n");
    }

    #[test]
    fn test_draws_curves_and_markers() {
        let renderer = TextChartRenderer::new(Vec::new(), 41, 12, "Ar");
        renderer.render(&chart(&[1200.0, 900.0]));
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        let plot: String = text
            .lines()
            .take(12)
            .filter_map(|l| l.split_once('|').map(|(_, cells)| cells.to_string()))
            .collect();
        assert!(plot.contains(THEORETICAL));
        assert!(plot.contains(ACTUAL));
        assert!(plot.contains('+'));
        assert!(plot.contains('x'));
        assert!(text.contains("< target"));
        assert!(text.contains("10  days"));
        // Plot rows plus axis, day labels and legend.
        assert_eq!(text.lines().count(), 12 + 3);
    }

    #[test]
    fn test_day_axis_has_intermediate_ticks() {
        let renderer = TextChartRenderer::new(Vec::new(), 41, 12, "Ar");
        let text = renderer.draw(&chart(&[1100.0]));
        let ticks = text.lines().nth(13).unwrap();
        let labels: Vec<&str> = ticks.split_whitespace().collect();
        assert_eq!(
            labels,
            ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "days"]
        );
        // Labels sit under their plot columns.
        let axis = text.lines().nth(12).unwrap();
        let origin = axis.find('+').unwrap() + 1;
        assert_eq!(ticks.find(" 5 ").unwrap() + 1, origin + 20);
    }

    #[test]
    fn test_day_ticks_thin_out_on_long_plans() {
        let renderer = TextChartRenderer::new(Vec::new(), 20, 5, "Ar");
        let ticks = renderer.day_ticks(36_525);
        let days: Vec<u32> = ticks
            .split_whitespace()
            .map(|d| d.parse().unwrap())
            .collect();
        assert_eq!(days.first(), Some(&0));
        assert_eq!(days.last(), Some(&36_525));
        assert!(days.len() <= 4, "{ticks}");
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_interpolate_between_points() {
        let series = [
            SeriesPoint { day: 0, capital: 100.0 },
            SeriesPoint { day: 2, capital: 200.0 },
        ];
        assert_eq!(interpolate(&series, 1.0), Some(150.0));
        assert_eq!(interpolate(&series, 2.0), Some(200.0));
        assert_eq!(interpolate(&series, 2.5), None);
        assert_eq!(interpolate(&[], 0.0), None);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_silent() {
        let renderer = TextChartRenderer::new(BrokenPipe, 40, 10, "Ar");
        renderer.render(&chart(&[1100.0]));
    }
}
