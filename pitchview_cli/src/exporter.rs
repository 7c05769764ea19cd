//! Figure export.
//!
//! Converts a [`Scene`] into a Plotly.js figure document, either as JSON or
//! wrapped in a standalone HTML page, or dumps the scene itself as JSON.

use anyhow::{Context, Result};
use clap::ValueEnum;
use nalgebra::Point3;
use pitchview_core::scene::{Axis, MarkerSet, Polyline, Scene, SceneLayout, Surface};
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Output format of `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Plotly figure JSON
    Json,
    /// Raw scene JSON
    Scene,
    /// Standalone HTML page
    #[default]
    Html,
}

/// Builds the Plotly figure for a scene.
///
/// Trace order: ground planes, strike zone, then per pitch type its curve
/// followed by its endpoint markers.
pub fn plotly_figure(scene: &Scene) -> Value {
    let mut data: Vec<Value> = Vec::new();
    data.extend(scene.ground.iter().map(surface_trace));
    data.extend(scene.strike_zone.iter().map(line_trace));
    for pitch in &scene.pitches {
        data.push(line_trace(&pitch.curve));
        data.push(marker_trace(&pitch.endpoints));
    }

    json!({
        "data": data,
        "layout": plotly_layout(&scene.layout),
    })
}

fn coords(points: &[Point3<f64>]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        points.iter().map(|p| p.x).collect(),
        points.iter().map(|p| p.y).collect(),
        points.iter().map(|p| p.z).collect(),
    )
}

fn surface_trace(surface: &Surface) -> Value {
    let color = surface.color.css();
    let z = vec![vec![surface.z; surface.x.len()]; surface.y.len()];
    json!({
        "type": "surface",
        "name": surface.name,
        "x": surface.x,
        "y": surface.y,
        "z": z,
        "colorscale": [[0, color], [1, color]],
        "showscale": false,
        "opacity": surface.opacity,
        "hoverinfo": "skip",
    })
}

fn line_trace(line: &Polyline) -> Value {
    let (x, y, z) = coords(&line.points);
    json!({
        "type": "scatter3d",
        "mode": "lines",
        "x": x,
        "y": y,
        "z": z,
        "line": { "color": line.color.css(), "width": line.width },
        "name": line.legend.clone().unwrap_or_default(),
        "showlegend": line.legend.is_some(),
    })
}

fn marker_trace(markers: &MarkerSet) -> Value {
    let (x, y, z) = coords(&markers.points);
    json!({
        "type": "scatter3d",
        "mode": "markers",
        "x": x,
        "y": y,
        "z": z,
        "marker": { "color": markers.color.css(), "size": markers.size },
        "showlegend": false,
    })
}

fn plotly_layout(layout: &SceneLayout) -> Value {
    let axis = |a: &Axis| {
        json!({
            "range": a.range,
            "showticklabels": a.show_tick_labels,
            "title": { "text": a.title },
        })
    };
    let [ex, ey, ez] = layout.camera.eye;
    let [ax, ay, az] = layout.aspect_ratio;

    json!({
        "title": {
            "text": layout.title.text,
            "x": layout.title.x,
            "xanchor": "center",
            "font": { "size": layout.title.font_size },
        },
        "scene": {
            "xaxis": axis(&layout.x_axis),
            "yaxis": axis(&layout.y_axis),
            "zaxis": axis(&layout.z_axis),
            "aspectmode": "manual",
            "aspectratio": { "x": ax, "y": ay, "z": az },
            "camera": { "eye": { "x": ex, "y": ey, "z": ez } },
        },
        "legend": {
            "title": { "text": layout.legend.title },
            "x": layout.legend.x,
            "y": layout.legend.y,
            "xanchor": layout.legend.x_anchor,
            "yanchor": layout.legend.y_anchor,
        },
    })
}

/// Wraps a figure in a page that loads Plotly.js from its CDN.
pub fn html_page(scene: &Scene) -> Result<String> {
    // Keep a "</script>" inside a string from closing the tag
    let figure = serde_json::to_string(&plotly_figure(scene))?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="pitchview" style="width:100%;height:100vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("pitchview", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = escape_html(&scene.layout.title.text),
        cdn = PLOTLY_CDN,
        figure = figure,
    ))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a scene in the requested format.
pub fn render(scene: &Scene, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Json => serde_json::to_string_pretty(&plotly_figure(scene))?,
        ExportFormat::Scene => serde_json::to_string_pretty(scene)?,
        ExportFormat::Html => html_page(scene)?,
    })
}

/// Writes a scene to `path` in the requested format.
pub fn write_to_file(scene: &Scene, format: ExportFormat, path: &Path) -> Result<()> {
    let body = render(scene, format)?;
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(body.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
