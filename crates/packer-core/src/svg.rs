//! SVG rendering of packing results.

use crate::packer::PackingResult;
use crate::solution::Solution;
use std::fmt::{self, Write};

const MARGIN: f64 = 20.0;
const SPACING: f64 = 40.0;
const FALLBACK_FILL: &str = "#4CAF50";

/// Layout options for [`render_svg`].
#[derive(Debug, Clone, Copy)]
pub struct SvgOptions {
    /// Pixels per unit of container side.
    pub scale: f64,
    /// Stroke items red when they overlap a container-mate.
    pub highlight_overlap: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            scale: 4.0,
            highlight_overlap: true,
        }
    }
}

/// Renders every container of a result stacked vertically, with a caption
/// holding the algorithm and score.
pub fn render_result(result: &PackingResult, options: SvgOptions) -> Result<String, fmt::Error> {
    let caption = format!(
        "{} | {} containers | waste {:.1}% | score {:.3}",
        result.algorithm,
        result.summary.total_containers,
        result.summary.waste_percentage,
        result.summary.score
    );
    render_svg(&result.solution, Some(&caption), options)
}

/// Renders a solution. Rotated items are labelled with an `(R)` suffix.
pub fn render_svg(
    solution: &Solution,
    caption: Option<&str>,
    options: SvgOptions,
) -> Result<String, fmt::Error> {
    let scale = options.scale;
    let header = if caption.is_some() { 20.0 } else { 0.0 };

    let max_side = solution
        .containers()
        .iter()
        .map(|c| f64::from(c.side()) * scale)
        .fold(0.0, f64::max);
    let total_height: f64 = solution
        .containers()
        .iter()
        .map(|c| f64::from(c.side()) * scale + SPACING)
        .sum();

    let svg_width = max_side + 2.0 * MARGIN;
    let svg_height = total_height + 2.0 * MARGIN + header;

    let mut svg = String::new();
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
        svg_width, svg_height
    )?;
    writeln!(svg, r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##)?;

    if let Some(caption) = caption {
        writeln!(
            svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="14" fill="#333">{}</text>"##,
            MARGIN,
            MARGIN,
            escape(caption)
        )?;
    }

    let mut y_offset = MARGIN + header + SPACING / 2.0;
    for (index, container) in solution.containers().iter().enumerate() {
        let side = f64::from(container.side()) * scale;

        writeln!(
            svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#333" stroke-width="2"/>"##,
            MARGIN, y_offset, side, side
        )?;
        writeln!(
            svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#333">Container {} ({:.0}% used)</text>"##,
            MARGIN,
            y_offset - 5.0,
            index + 1,
            container.utilization() * 100.0
        )?;

        for (k, item) in container.items().iter().enumerate() {
            let Some(position) = item.position else {
                continue;
            };
            let px = MARGIN + f64::from(position.x) * scale;
            let py = y_offset + f64::from(position.y) * scale;
            let pw = f64::from(item.width) * scale;
            let ph = f64::from(item.height) * scale;

            let stroke = if options.highlight_overlap && container.worst_overlap_ratio(k) > 0.0 {
                "#D32F2F"
            } else {
                "#2E7D32"
            };
            let fill = item.color.as_deref().unwrap_or(FALLBACK_FILL);

            writeln!(
                svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="1" opacity="0.7"/>"##,
                px,
                py,
                pw,
                ph,
                escape(fill),
                stroke
            )?;

            let label = if item.rotated {
                format!("{} (R)", item.id)
            } else {
                item.id.to_string()
            };
            writeln!(
                svg,
                r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
                px + pw / 2.0,
                py + ph / 2.0 + 3.0,
                label
            )?;
        }

        y_offset += side + SPACING;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, Position};

    #[test]
    fn test_render_marks_rotated_items() {
        let mut solution = Solution::new();
        let mut upright = Item::new(0, 4, 2);
        upright.place_at(Position { x: 0, y: 0 }, false);
        let mut turned = Item::new(1, 4, 2).with_color("#1976D2");
        turned.place_at(Position { x: 4, y: 0 }, true);
        let index = solution.open_container(10, upright);
        solution.add_item(index, turned);

        let svg = render_svg(&solution, Some("greedy <test>"), SvgOptions::default()).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("#1 (R)"));
        assert!(svg.contains(">#0<"));
        assert!(svg.contains("fill=\"#1976D2\""));
        assert!(svg.contains("greedy &lt;test&gt;"));
        assert!(svg.contains("Container 1"));
    }

    #[test]
    fn test_overlapping_items_are_highlighted() {
        let mut solution = Solution::new();
        let mut a = Item::new(0, 5, 5);
        a.place_at(Position::default(), false);
        let mut b = Item::new(1, 5, 5);
        b.place_at(Position { x: 2, y: 2 }, false);
        let index = solution.open_container(10, a);
        solution.add_item(index, b);

        let svg = render_svg(&solution, None, SvgOptions::default()).unwrap();
        assert_eq!(svg.matches("#D32F2F").count(), 2);

        let plain = render_svg(
            &solution,
            None,
            SvgOptions {
                highlight_overlap: false,
                ..SvgOptions::default()
            },
        )
        .unwrap();
        assert!(!plain.contains("#D32F2F"));
    }
}
