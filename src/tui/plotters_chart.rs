//! Plotters-powered unit price bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Category labels are drawn by the caller underneath the chart, since terminal
//! cells are too coarse for Plotters' own x-axis labels.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only bar chart description.
///
/// The widget is intentionally data-driven: values and bounds are computed
/// outside the render call.
pub struct UnitPriceChart<'a> {
    /// One bar per work item, catalog order. Bar `i` is centred on `x = i`.
    pub values: &'a [f64],
    /// Y bounds (currency).
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
    /// Formatting of y tick labels.
    pub fmt_y: fn(f64) -> String,
}

impl UnitPriceChart<'_> {
    /// Y bounds that always include zero and leave headroom above the tallest bar.
    pub fn bounds_for(values: &[f64]) -> [f64; 2] {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if hi <= lo {
            return [0.0, 1.0];
        }
        let pad = (hi - lo) * 0.1;
        [if lo < 0.0 { lo - pad } else { 0.0 }, hi + pad]
    }
}

impl Widget for UnitPriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.values.len();
        let [y0, y1] = self.y_bounds;
        if n == 0 || !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }
        let x0 = -0.5;
        let x1 = n as f64 - 0.5;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 1)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .y_labels(5)
                .x_label_formatter(&|_| String::new())
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // High-contrast bar fill for terminal readability.
            let bar_style = ShapeStyle {
                color: RGBAColor(0, 200, 255, 1.0),
                filled: true,
                stroke_width: 1,
            };

            chart.draw_series(self.values.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                let v = if v.is_finite() { v } else { 0.0 };
                Rectangle::new([(x - 0.3, 0.0), (x + 0.3, v)], bar_style)
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_include_zero_and_headroom() {
        let [lo, hi] = UnitPriceChart::bounds_for(&[100.0, 400.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 440.0).abs() < 1e-9);
        let [lo, hi] = UnitPriceChart::bounds_for(&[-100.0, 100.0]);
        assert!((lo - -120.0).abs() < 1e-9 && (hi - 120.0).abs() < 1e-9);
        assert_eq!(UnitPriceChart::bounds_for(&[]), [0.0, 1.0]);
        assert_eq!(UnitPriceChart::bounds_for(&[f64::NAN, 0.0]), [0.0, 1.0]);
    }
}
