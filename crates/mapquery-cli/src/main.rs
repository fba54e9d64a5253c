use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mapquery_cli::args::{parse_lat_lon, OutputFormat};
use mapquery_cli::output::{render_info, render_route, render_search, render_tiles, MapSummary};
use mapquery_cli::terminal::ColorPalette;
use mapquery_lib::{
    load_osm, BoundingBox, Coordinate, MapConfig, MapIndex, RasterRequest, RouteAlgorithm,
    RouteRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road routing, map tiles and place search over OSM extracts")]
struct Cli {
    /// OSM PBF extract to load.
    #[arg(long, env = "MAPQUERY_DATA_PATH", global = true)]
    data: Option<PathBuf>,

    /// Deepest quadtree level (overrides MAPQUERY_MAX_DEPTH).
    #[arg(long, global = true)]
    max_depth: Option<u8>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest road route between two points.
    Route {
        /// Start point as LAT,LON.
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        from: Coordinate,
        /// Destination as LAT,LON.
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        to: Coordinate,
        /// Search algorithm: a-star or dijkstra.
        #[arg(long, default_value = "a-star")]
        algorithm: RouteAlgorithm,
    },
    /// Tiles covering a viewport.
    Tiles {
        /// Upper-left corner as LAT,LON.
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        ul: Coordinate,
        /// Lower-right corner as LAT,LON.
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        lr: Coordinate,
        /// Viewport width in pixels.
        #[arg(long)]
        width: f64,
        /// Viewport height in pixels (defaults to the width).
        #[arg(long)]
        height: Option<f64>,
    },
    /// Autocomplete a place name, or list records for an exact name.
    Search {
        term: String,
        /// Match the whole name and print every record.
        #[arg(long)]
        exact: bool,
        /// Maximum number of suggestions, or of records with `--exact`.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Summarize the loaded map.
    Info,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = MapConfig::from_env().context("invalid MAPQUERY_* configuration")?;
    if let Some(depth) = cli.max_depth {
        config = config.with_max_depth(depth);
    }
    let data = cli
        .data
        .as_deref()
        .context("no map data given; pass --data or set MAPQUERY_DATA_PATH")?;
    let map = load_map(data, &config)?;

    let palette = ColorPalette::detect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
        } => {
            let request = RouteRequest::a_star(from, to).with_algorithm(algorithm);
            let plan = map
                .route_with(&request)
                .with_context(|| format!("failed to route from {from} to {to}"))?;
            render_route(&mut out, &plan, cli.format, palette)?;
        }
        Command::Tiles {
            ul,
            lr,
            width,
            height,
        } => {
            let request = RasterRequest::new(
                BoundingBox::from_corners(ul, lr),
                width,
                height.unwrap_or(width),
            );
            let plan = map.raster(&request);
            render_tiles(&mut out, &plan, cli.format, palette)?;
        }
        Command::Search { term, exact, limit } => {
            let results = map.search_limited(&term, exact, limit);
            render_search(&mut out, &results, cli.format, palette)?;
        }
        Command::Info => {
            render_info(&mut out, &MapSummary::from_index(&map), cli.format, palette)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_map(path: &Path, config: &MapConfig) -> Result<MapIndex> {
    load_osm(path, config)
        .with_context(|| format!("failed to load map data from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
