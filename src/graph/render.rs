use crate::graph::{GraphDataset, GraphError, Node};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt::Write as _;
use tiny_skia::{Pixmap, Transform};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 500;

const BACKGROUND: &str = "#0A0C0F";
const BAND_FILL: &str = "#1F2229";
const BAND_LABEL: &str = "#668099";
const EDGE_OK: &str = "#00FF95";
const EDGE_VIOLATION: &str = "#DC2828";
const NODE_FILL: &str = "#0F1115";
const NODE_TEXT: &str = "#D1D9E0";

const NODE_RADIUS: f64 = 14.0;
const ARROW_INSET: f64 = 18.0;
const ARROW_LENGTH: f64 = 6.0;
const ARROW_SPREAD: f64 = 0.4;

/// Builds the graph scene as an SVG document. Draw order is part of the
/// contract: background, layer bands, edge lines, arrowheads, then nodes, so
/// later elements occlude earlier ones. Edges and nodes are emitted in input
/// order. All edge endpoints are resolved before a single element is written,
/// so a broken dataset produces an error and no partial scene.
pub fn scene_svg(dataset: &GraphDataset) -> Result<String, GraphError> {
    dataset.validate()?;

    let index: HashMap<&str, &Node> = dataset
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    let spans = dataset
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            let resolve = |id: &str| {
                index.get(id).copied().ok_or_else(|| GraphError::UnknownNode {
                    edge: i,
                    node: id.to_string(),
                })
            };
            Ok((resolve(&edge.from)?, resolve(&edge.to)?, edge.violation))
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CANVAS_WIDTH}' height='{CANVAS_HEIGHT}' viewBox='0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}'>"
    );
    let _ = writeln!(
        svg,
        "  <rect width='{CANVAS_WIDTH}' height='{CANVAS_HEIGHT}' fill='{BACKGROUND}'/>"
    );

    for band in &dataset.bands {
        let _ = writeln!(
            svg,
            "  <rect x='10' y='{}' width='{}' height='{}' fill='{BAND_FILL}' fill-opacity='0.4'/>",
            band.top,
            CANVAS_WIDTH - 20,
            band.height
        );
        let _ = writeln!(
            svg,
            "  <text x='18' y='{}' fill='{BAND_LABEL}' fill-opacity='0.5' font-family='Inter, sans-serif' font-size='11'>{}</text>",
            band.top + 16.0,
            escape_text(band.layer.name())
        );
    }

    for (from, to, violation) in &spans {
        if *violation {
            let _ = writeln!(
                svg,
                "  <line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{EDGE_VIOLATION}' stroke-opacity='0.7' stroke-width='1.5' stroke-dasharray='5 4'/>",
                from.x, from.y, to.x, to.y
            );
        } else {
            let _ = writeln!(
                svg,
                "  <line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{EDGE_OK}' stroke-opacity='0.2' stroke-width='1'/>",
                from.x, from.y, to.x, to.y
            );
        }
    }

    for (from, to, violation) in &spans {
        let angle = (to.y - from.y).atan2(to.x - from.x);
        // Pull the tip inside the target's circle so the arrow stays visible.
        let tip_x = to.x - angle.cos() * ARROW_INSET;
        let tip_y = to.y - angle.sin() * ARROW_INSET;
        let left_x = tip_x - ARROW_LENGTH * (angle - ARROW_SPREAD).cos();
        let left_y = tip_y - ARROW_LENGTH * (angle - ARROW_SPREAD).sin();
        let right_x = tip_x - ARROW_LENGTH * (angle + ARROW_SPREAD).cos();
        let right_y = tip_y - ARROW_LENGTH * (angle + ARROW_SPREAD).sin();
        let (fill, opacity) = if *violation {
            (EDGE_VIOLATION, "0.7")
        } else {
            (EDGE_OK, "0.3")
        };
        let _ = writeln!(
            svg,
            "  <path d='M{tip_x:.2} {tip_y:.2} L{left_x:.2} {left_y:.2} L{right_x:.2} {right_y:.2} Z' fill='{fill}' fill-opacity='{opacity}'/>"
        );
    }

    for node in &dataset.nodes {
        let _ = writeln!(
            svg,
            "  <circle cx='{}' cy='{}' r='{NODE_RADIUS}' fill='{NODE_FILL}' stroke='{}' stroke-width='2'/>",
            node.x,
            node.y,
            node.layer.color()
        );
        let _ = writeln!(
            svg,
            "  <text x='{}' y='{}' text-anchor='middle' fill='{NODE_TEXT}' font-family='JetBrains Mono, monospace' font-size='10'>{}</text>",
            node.x,
            node.y + 28.0,
            escape_text(&node.id)
        );
    }

    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}

/// Draws the dataset onto a caller-owned pixmap.
pub fn render(pixmap: &mut Pixmap, dataset: &GraphDataset) -> Result<()> {
    let svg = scene_svg(dataset)?;
    rasterize(&svg, pixmap, Transform::default())
}

/// Renders the dataset at the given scale factor and encodes it as PNG.
pub fn render_png(dataset: &GraphDataset, scale: f32) -> Result<Vec<u8>> {
    let svg = scene_svg(dataset)?;
    let width = (CANVAS_WIDTH as f32 * scale).round() as u32;
    let height = (CANVAS_HEIGHT as f32 * scale).round() as u32;
    let mut pixmap = Pixmap::new(width, height).context("pixmap allocation failed")?;
    rasterize(&svg, &mut pixmap, Transform::from_scale(scale, scale))?;
    pixmap.encode_png().context("png encoding failed")
}

fn rasterize(svg: &str, pixmap: &mut Pixmap, transform: Transform) -> Result<()> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_data(svg.as_bytes(), &options).context("graph scene failed to parse")?;

    let mut pixmap_ref = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pixmap_ref);
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
