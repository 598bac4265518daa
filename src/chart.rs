//! Server-side SVG pie chart for the footprint breakdown.

use crate::scoring::{Breakdown, Category};
use std::fmt::Write;

pub const TITLE: &str = "Your Carbon Footprint by Category";
pub const COLORS: [&str; 4] = ["#FA3B3B", "#6391EC", "#58D6F3", "#93F0C5"];
/// First wedge starts at twelve o'clock; wedges run counter-clockwise.
const START_ANGLE: f64 = 90.0;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 380.0;
const CX: f64 = 240.0;
const CY: f64 = 210.0;
const RADIUS: f64 = 130.0;
const PERCENT_DISTANCE: f64 = 0.6;
const LABEL_DISTANCE: f64 = 1.12;

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub category: Category,
    pub color: &'static str,
    pub percent: f64,
    /// Degrees, counter-clockwise from three o'clock.
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    fn is_full_circle(&self) -> bool {
        self.end - self.start >= 360.0 - 1e-9
    }

    /// SVG path for the wedge. Not meaningful for a full circle.
    pub fn path(&self) -> String {
        let (x0, y0) = point(self.start, RADIUS);
        let (x1, y1) = point(self.end, RADIUS);
        let large_arc = u8::from(self.end - self.start > 180.0);
        format!(
            "M {CX:.2} {CY:.2} L {x0:.2} {y0:.2} A {RADIUS:.2} {RADIUS:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z"
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub wedges: Vec<Wedge>,
}

/// Builds the chart, or `None` when every category is zero.
pub fn pie(breakdown: &Breakdown) -> Option<PieChart> {
    let shares = breakdown.shares()?;
    let mut angle = START_ANGLE;
    let wedges = Category::ALL
        .iter()
        .zip(shares)
        .zip(COLORS)
        .filter(|((_, percent), _)| *percent > 0.0)
        .map(|((category, percent), color)| {
            let start = angle;
            angle += percent * 3.6;
            Wedge {
                category: *category,
                color,
                percent,
                start,
                end: angle,
            }
        })
        .collect();
    Some(PieChart { wedges })
}

impl PieChart {
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg class="pie" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{TITLE}">"#
        );
        let _ = write!(
            svg,
            r#"<text class="pie-title" x="{CX}" y="34" text-anchor="middle">{TITLE}</text>"#
        );

        for wedge in &self.wedges {
            if wedge.is_full_circle() {
                let _ = write!(
                    svg,
                    r#"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="{}" />"#,
                    wedge.color
                );
            } else {
                let _ = write!(svg, r#"<path d="{}" fill="{}" />"#, wedge.path(), wedge.color);
            }
        }

        for wedge in &self.wedges {
            let (px, py) = if wedge.is_full_circle() {
                (CX, CY)
            } else {
                point(wedge.mid(), RADIUS * PERCENT_DISTANCE)
            };
            let _ = write!(
                svg,
                r#"<text class="pie-percent" x="{px:.2}" y="{py:.2}" text-anchor="middle" dominant-baseline="middle">{:.1}%</text>"#,
                wedge.percent
            );

            let (lx, ly) = point(wedge.mid(), RADIUS * LABEL_DISTANCE);
            let anchor = if lx >= CX { "start" } else { "end" };
            let _ = write!(
                svg,
                r#"<text class="pie-label" x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                wedge.category.label()
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

fn point(degrees: f64, radius: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (CX + radius * radians.cos(), CY - radius * radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedges_cover_the_circle_from_twelve_oclock() {
        let chart = pie(&Breakdown::from_inputs(500, 5000, 4, 3)).expect("chart");
        assert_eq!(chart.wedges.len(), 4);
        assert_eq!(chart.wedges[0].start, 90.0);
        for pair in chart.wedges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!((chart.wedges[3].end - 450.0).abs() < 1e-9);
        assert_eq!(chart.wedges[1].color, "#6391EC");
    }

    #[test]
    fn zero_categories_are_skipped() {
        let chart = pie(&Breakdown::from_inputs(0, 5000, 0, 3)).expect("chart");
        let categories: Vec<_> = chart.wedges.iter().map(|w| w.category).collect();
        assert_eq!(categories, [Category::Food, Category::Waste]);
        assert_eq!(chart.wedges[1].color, "#93F0C5");
    }

    #[test]
    fn empty_breakdown_has_no_chart() {
        assert!(pie(&Breakdown::from_inputs(0, 0, 0, 0)).is_none());
    }

    #[test]
    fn single_category_renders_full_circle() {
        let chart = pie(&Breakdown::from_inputs(0, 1000, 0, 0)).expect("chart");
        let svg = chart.to_svg();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("100.0%"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn large_wedge_uses_large_arc_flag() {
        let wedge = Wedge {
            category: Category::Transport,
            color: COLORS[0],
            percent: 75.0,
            start: 90.0,
            end: 360.0,
        };
        assert!(wedge.path().contains(" 0 1 0 "));
    }

    #[test]
    fn svg_lists_percentages_and_labels() {
        let svg = pie(&Breakdown::from_inputs(500, 5000, 4, 3)).unwrap().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("50.4%"));
        assert!(svg.contains(">Transport<"));
        assert!(svg.contains(TITLE));
    }
}
