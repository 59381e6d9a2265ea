use crate::data::DataTable;
use crate::palettes::{hex_of, CategoricalColorMapper, Palette};
use crate::{Error, PlotParams, Tooltip};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::Serialize;

/// Column that buckets rows into discrete colors.
pub const COLOR_BUCKET_COLUMN: &str = "color_bucket";

/// One scatter point in backend (pixel) coordinates, carried into the HTML
/// document for the hover layer.
#[derive(Serialize)]
struct HoverPoint {
    x: i32,
    y: i32,
    color: String,
    lines: Vec<String>,
}

/// Draws the scatter into an SVG string and wraps it in a self-contained
/// HTML document with an inline hover-tooltip layer.
pub(crate) fn render(
    data: &DataTable,
    params: &PlotParams,
    tooltips: &[Tooltip],
    factors: &[String],
    x_label: &str,
    page_title: &str,
) -> Result<String, Error> {
    let xs = data.numeric_column(&params.x_axis)?;
    let ys = data.numeric_column(&params.y_axis)?;
    if data.column(COLOR_BUCKET_COLUMN).is_none() {
        return Err(Error::MissingColumn(COLOR_BUCKET_COLUMN.to_string()));
    }
    let palette = Palette::resolve(&params.palette);
    let mapper = CategoricalColorMapper::new(factors, palette);

    let mut svg = String::new();
    let mut hover = Vec::with_capacity(xs.len());
    {
        let root =
            SVGBackend::with_string(&mut svg, (params.width, params.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&params.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(padded_range(&xs), padded_range(&ys))
            .map_err(draw_err)?;
        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(params.y_axis_label.as_str())
            .draw()
            .map_err(draw_err)?;
        for (row, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
            let bucket = data.cell_text(COLOR_BUCKET_COLUMN, row);
            let rgb = mapper.color_for(&bucket);
            let color = RGBColor(rgb[0], rgb[1], rgb[2]);
            chart
                .draw_series(std::iter::once(Circle::new(
                    (x, y),
                    params.point_size as i32,
                    color.filled(),
                )))
                .map_err(draw_err)?;
            let (px, py) = chart.backend_coord(&(x, y));
            hover.push(HoverPoint {
                x: px,
                y: py,
                color: hex_of(rgb),
                lines: tooltip_lines(tooltips, data, row),
            });
        }
        root.present().map_err(draw_err)?;
    }

    let points = serde_json::to_string(&hover)?;
    Ok(HTML_TEMPLATE
        .replace("__PAGE_TITLE__", &escape_html(page_title))
        .replace("__SVG__", &svg)
        .replace("__POINTS__", &points)
        .replace("__RADIUS__", &(params.point_size + 4).to_string()))
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Render(e.to_string())
}

/// Resolves tooltip fields for one row: `@name` reads a column, `$index` is
/// the row number, anything else is shown literally.
fn tooltip_lines(tooltips: &[Tooltip], data: &DataTable, row: usize) -> Vec<String> {
    tooltips
        .iter()
        .map(|(label, field)| {
            let value = if let Some(column) = field.strip_prefix('@') {
                data.cell_text(column, row)
            } else if field == "$index" {
                row.to_string()
            } else {
                field.clone()
            };
            format!("{}: {}", label, value)
        })
        .collect()
}

/// Data range with 5% padding on both sides; unit padding when degenerate.
fn padded_range(values: &[f64]) -> std::ops::Range<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

const HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>__PAGE_TITLE__</title>
<style>
body{margin:0;font-family:sans-serif}
#tooltip{position:absolute;display:none;background:rgba(0,0,0,0.8);color:#fff;padding:4px 8px;border-radius:3px;font-size:12px;pointer-events:none;white-space:pre}
</style>
</head>
<body>
<div id="plot">__SVG__</div>
<div id="tooltip"></div>
<script>
const points = __POINTS__;
const tooltip = document.getElementById("tooltip");
const svg = document.querySelector("#plot svg");
const radius = __RADIUS__;
svg.addEventListener("mousemove", function (event) {
  const rect = svg.getBoundingClientRect();
  const mx = event.clientX - rect.left;
  const my = event.clientY - rect.top;
  let best = null;
  let bestDist = radius * radius;
  for (const p of points) {
    const dx = p.x - mx;
    const dy = p.y - my;
    const d = dx * dx + dy * dy;
    if (d <= bestDist) { best = p; bestDist = d; }
  }
  if (best) {
    tooltip.style.display = "block";
    tooltip.style.left = (event.pageX + 12) + "px";
    tooltip.style.top = (event.pageY + 12) + "px";
    tooltip.style.borderLeft = "4px solid " + best.color;
    tooltip.textContent = best.lines.join("\n");
  } else {
    tooltip.style.display = "none";
  }
});
svg.addEventListener("mouseleave", function () { tooltip.style.display = "none"; });
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> DataTable {
        DataTable::from_csv_reader("x,y,color_bucket\n1,2,a\n2,3,b\n3,4,a\n".as_bytes()).unwrap()
    }

    fn params() -> PlotParams {
        PlotParams {
            x_axis: "x".to_string(),
            y_axis: "y".to_string(),
            y_axis_label: "Y".to_string(),
            title: "T".to_string(),
            width: 400,
            height: 300,
            point_size: 5,
            palette: "Viridis".to_string(),
            x_axis_label: None,
            output_file_path: None,
            output_file_title: None,
        }
    }

    fn factors() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn renders_labels_and_hover_payload() {
        let tooltips = vec![("X".to_string(), "@x".to_string())];
        let html = render(&table(), &params(), &tooltips, &factors(), "number", "Bokeh Plot")
            .unwrap();
        assert!(html.contains("<title>Bokeh Plot</title>"));
        assert!(html.contains("number"));
        // first row of viridis-colored bucket "a" and its tooltip line
        assert!(html.contains("#440154"));
        assert!(html.contains("X: 1"));
    }

    #[test]
    fn render_is_deterministic() {
        let tooltips = vec![("X".to_string(), "@x".to_string())];
        let a = render(&table(), &params(), &tooltips, &factors(), "number", "t").unwrap();
        let b = render(&table(), &params(), &tooltips, &factors(), "number", "t").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_axis_column_fails() {
        let err = render(
            &table(),
            &PlotParams {
                x_axis: "nope".to_string(),
                ..params()
            },
            &[],
            &factors(),
            "number",
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "nope"));
    }

    #[test]
    fn missing_color_bucket_fails() {
        let data = DataTable::from_csv_reader("x,y\n1,2\n".as_bytes()).unwrap();
        let err = render(&data, &params(), &[], &factors(), "number", "t").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == COLOR_BUCKET_COLUMN));
    }

    #[test]
    fn tooltip_field_forms() {
        let tooltips = vec![
            ("Bucket".to_string(), "@color_bucket".to_string()),
            ("Row".to_string(), "$index".to_string()),
            ("Note".to_string(), "fixed".to_string()),
        ];
        assert_eq!(
            tooltip_lines(&tooltips, &table(), 1),
            vec!["Bucket: b", "Row: 1", "Note: fixed"]
        );
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(&[3.0, 3.0]), 2.0..4.0);
        assert_eq!(padded_range(&[]), 0.0..1.0);
        let r = padded_range(&[0.0, 10.0]);
        assert!((r.start + 0.5).abs() < 1e-9);
        assert!((r.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn page_title_is_escaped() {
        let html = render(&table(), &params(), &[], &factors(), "number", "<b>t</b>").unwrap();
        assert!(html.contains("<title>&lt;b&gt;t&lt;/b&gt;</title>"));
    }
}
