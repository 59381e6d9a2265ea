use log::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod data;
pub mod palettes;
mod render;

pub use data::DataTable;
pub use palettes::{CategoricalColorMapper, Palette};
pub use render::COLOR_BUCKET_COLUMN;

/// Output path used when `output_file_path` is unset or empty.
pub const DEFAULT_OUTPUT_FILE: &str = "main.html";
/// Page title used when `output_file_title` is unset or empty.
pub const DEFAULT_PAGE_TITLE: &str = "Bokeh Plot";
/// The x-axis label every figure historically carried, regardless of params.
const FIXED_X_AXIS_LABEL: &str = "number";

/// A hover tooltip entry: (label, field). Fields starting with `@` name a
/// data column, `$index` is the row number, anything else shows literally.
pub type Tooltip = (String, String);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("data table not set or empty")]
    MissingData,
    #[error("plot parameters not set")]
    MissingParams,
    #[error("tooltips not set")]
    MissingTooltips,
    #[error("color factors not set")]
    MissingColorFactors,
    #[error("no figure has been generated yet")]
    MissingFigure,
    #[error("column '{0}' not found in data table")]
    MissingColumn(String),
    #[error("column '{0}' contains a non-numeric value")]
    NonNumericColumn(String),
    #[error("column '{0}' has {1} rows, expected {2}")]
    ColumnLength(String, usize, usize),
    #[error("render failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Plot configuration. All recognized fields are enumerated here; loading
/// from JSON rejects unknown keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotParams {
    pub x_axis: String,
    pub y_axis: String,
    pub y_axis_label: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub point_size: u32,
    pub palette: String,
    /// Overrides the fixed `"number"` x-axis label when set. Logged as a
    /// warning since older plots always showed `"number"` here.
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub output_file_path: Option<PathBuf>,
    #[serde(default)]
    pub output_file_title: Option<String>,
}

impl PlotParams {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<PlotParams, Error> {
        Ok(serde_json::from_reader(fs::File::open(path)?)?)
    }

    fn output_path(&self) -> PathBuf {
        match &self.output_file_path {
            Some(p) if !p.as_os_str().is_empty() => p.clone(),
            _ => PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    fn page_title(&self) -> &str {
        match &self.output_file_title {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_PAGE_TITLE,
        }
    }

    fn x_label(&self) -> &str {
        match &self.x_axis_label {
            Some(label) => {
                warn!(
                    "Overriding fixed x-axis label '{}' with '{}'",
                    FIXED_X_AXIS_LABEL, label
                );
                label
            }
            None => FIXED_X_AXIS_LABEL,
        }
    }
}

/// The figure produced by [`ScatterPlotAgent::generate`]: the written output
/// file and its rendered HTML.
#[derive(Debug)]
pub struct RenderedFigure {
    path: PathBuf,
    html: String,
}

impl RenderedFigure {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Holds the plot inputs, validates their presence, and delegates drawing to
/// the plotting engine.
///
/// Set the four inputs in any order, then call [`generate`](Self::generate)
/// to write the HTML file and [`display_plot`](Self::display_plot) to open
/// it in the default browser.
#[derive(Debug, Default)]
pub struct ScatterPlotAgent {
    data: Option<DataTable>,
    params: Option<PlotParams>,
    tooltips: Option<Vec<Tooltip>>,
    color_factors: Option<Vec<String>>,
    figure: Option<RenderedFigure>,
}

impl ScatterPlotAgent {
    pub fn new() -> ScatterPlotAgent {
        ScatterPlotAgent::default()
    }

    pub fn set_data(&mut self, data: DataTable) {
        self.data = Some(data);
    }

    pub fn set_params(&mut self, params: PlotParams) {
        self.params = Some(params);
    }

    pub fn set_tooltips(&mut self, tooltips: Vec<Tooltip>) {
        self.tooltips = Some(tooltips);
    }

    pub fn set_color_factors(&mut self, color_factors: Vec<String>) {
        self.color_factors = Some(color_factors);
    }

    /// Renders the figure and writes it to the output file. Any previously
    /// generated figure is replaced. Presence checks run in a fixed order;
    /// column-level problems surface from the rendering step instead.
    pub fn generate(&mut self) -> Result<(), Error> {
        let data = match &self.data {
            Some(table) if !table.is_empty() => table,
            _ => return Err(Error::MissingData),
        };
        let params = self.params.as_ref().ok_or(Error::MissingParams)?;
        let tooltips = self.tooltips.as_ref().ok_or(Error::MissingTooltips)?;
        let factors = self.color_factors.as_ref().ok_or(Error::MissingColorFactors)?;

        let path = params.output_path();
        let html = render::render(
            data,
            params,
            tooltips,
            factors,
            params.x_label(),
            params.page_title(),
        )?;
        fs::write(&path, &html)?;
        info!("Wrote {} ({} points)", path.display(), data.len());
        self.figure = Some(RenderedFigure { path, html });
        Ok(())
    }

    pub fn figure(&self) -> Option<&RenderedFigure> {
        self.figure.as_ref()
    }

    /// Opens the generated figure's output file in the default browser.
    pub fn display_plot(&self) -> Result<(), Error> {
        let figure = self.figure.as_ref().ok_or(Error::MissingFigure)?;
        info!("Opening {}", figure.path.display());
        webbrowser::open(&figure.path.to_string_lossy())?;
        Ok(())
    }
}
