use anyhow::Context;
use clap::{App, Arg};
use itertools::Itertools;
use scatter_agent::{
    DataTable, PlotParams, ScatterPlotAgent, Tooltip, COLOR_BUCKET_COLUMN,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

fn main() -> anyhow::Result<()> {
    let matches = App::new(NAME)
        .version(VERSION)
        .author(AUTHOR)
        .about("Render a csv into an interactive scatter plot HTML file")
        .arg(
            Arg::with_name("INPUT")
                .help("Specify the .csv file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all output"),
        )
        .arg(
            Arg::with_name("recursive")
                .short("r")
                .help("Finds .csv files in the specified folder and runs on all of them"),
        )
        .arg(
            Arg::with_name("x-axis")
                .short("x")
                .long("x-axis")
                .takes_value(true)
                .default_value("x")
                .help("Column to plot on the x axis"),
        )
        .arg(
            Arg::with_name("y-axis")
                .short("y")
                .long("y-axis")
                .takes_value(true)
                .default_value("y")
                .help("Column to plot on the y axis"),
        )
        .arg(
            Arg::with_name("palette")
                .long("palette")
                .takes_value(true)
                .default_value("Turbo")
                .help("Palette name (Magma, Inferno, Plasma, Viridis, Cividis, Turbo, Category10, Dark2)"),
        )
        .arg(
            Arg::with_name("point-size")
                .long("point-size")
                .takes_value(true)
                .default_value("5")
                .help("Scatter point radius in pixels"),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .takes_value(true)
                .default_value("")
                .help("Figure title"),
        )
        .arg(
            Arg::with_name("y-label")
                .long("y-label")
                .takes_value(true)
                .default_value("")
                .help("Y axis label"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .default_value("800")
                .help("Figure width in pixels"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .default_value("600")
                .help("Figure height in pixels"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output .html path (defaults to main.html)"),
        )
        .arg(
            Arg::with_name("page-title")
                .long("page-title")
                .takes_value(true)
                .help("Title of the generated HTML page"),
        )
        .arg(
            Arg::with_name("tooltip")
                .short("t")
                .long("tooltip")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Hover tooltip as LABEL=@column (repeatable)"),
        )
        .arg(
            Arg::with_name("params")
                .long("params")
                .takes_value(true)
                .help("Load plot parameters from a JSON file instead of flags"),
        )
        .arg(
            Arg::with_name("open")
                .long("open")
                .help("Open the generated plot in the default browser"),
        )
        .get_matches();

    let verbose = matches.occurrences_of("verbose") as usize;
    let quiet = matches.is_present("quiet");
    stderrlog::new()
        .module(module_path!())
        .quiet(quiet)
        .verbosity(verbose)
        .init()
        .unwrap();

    let params = match matches.value_of("params") {
        Some(path) => {
            PlotParams::from_json_path(path).with_context(|| format!("Loading params {}", path))?
        }
        None => params_from_flags(&matches)?,
    };
    let tooltips = match matches.values_of("tooltip") {
        Some(values) => values.map(parse_tooltip).collect::<anyhow::Result<Vec<_>>>()?,
        None => default_tooltips(&params),
    };
    let open = matches.is_present("open");

    let input = matches.value_of("INPUT").unwrap();
    let exts = vec![".csv", ".csv.gz"];

    if matches.is_present("recursive") {
        for entry in WalkDir::new(input) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy();
            if exts.iter().any(|ext| name.ends_with(ext)) {
                let mut params = params.clone();
                params.output_file_path = Some(entry.path().with_extension("html"));
                run(entry.path(), params, tooltips.clone(), open)?;
            }
        }
        Ok(())
    } else {
        run(Path::new(input), params, tooltips, open)
    }
}

fn params_from_flags(matches: &clap::ArgMatches) -> anyhow::Result<PlotParams> {
    Ok(PlotParams {
        x_axis: matches.value_of("x-axis").unwrap().to_string(),
        y_axis: matches.value_of("y-axis").unwrap().to_string(),
        y_axis_label: matches.value_of("y-label").unwrap().to_string(),
        title: matches.value_of("title").unwrap().to_string(),
        width: parse_flag(matches, "width")?,
        height: parse_flag(matches, "height")?,
        point_size: parse_flag(matches, "point-size")?,
        palette: matches.value_of("palette").unwrap().to_string(),
        x_axis_label: None,
        output_file_path: matches.value_of("output").map(PathBuf::from),
        output_file_title: matches.value_of("page-title").map(str::to_string),
    })
}

fn parse_flag(matches: &clap::ArgMatches, name: &str) -> anyhow::Result<u32> {
    let value = matches.value_of(name).unwrap();
    value
        .parse()
        .with_context(|| format!("--{} expects a number, got '{}'", name, value))
}

fn parse_tooltip(spec: &str) -> anyhow::Result<Tooltip> {
    let (label, field) = spec
        .split_once('=')
        .with_context(|| format!("Tooltip '{}' is not LABEL=field", spec))?;
    Ok((label.to_string(), field.to_string()))
}

/// Without explicit tooltips, hover shows the plotted columns.
fn default_tooltips(params: &PlotParams) -> Vec<Tooltip> {
    vec![
        (params.x_axis.clone(), format!("@{}", params.x_axis)),
        (params.y_axis.clone(), format!("@{}", params.y_axis)),
    ]
}

fn run(path: &Path, params: PlotParams, tooltips: Vec<Tooltip>, open: bool) -> anyhow::Result<()> {
    let table = DataTable::from_csv_path(path)
        .with_context(|| format!("Loading {}", path.display()))?;
    let factors: Vec<String> = (0..table.len())
        .map(|row| table.cell_text(COLOR_BUCKET_COLUMN, row))
        .unique()
        .collect();

    let mut agent = ScatterPlotAgent::new();
    agent.set_data(table);
    agent.set_params(params);
    agent.set_tooltips(tooltips);
    agent.set_color_factors(factors);
    agent
        .generate()
        .with_context(|| format!("Rendering {}", path.display()))?;
    if open {
        agent.display_plot()?;
    }
    Ok(())
}
