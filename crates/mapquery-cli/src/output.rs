//! Output rendering for command results.
//!
//! Every renderer writes either a text view (styled with a [`ColorPalette`])
//! or pretty JSON, depending on the selected [`OutputFormat`].

use std::io::{self, Write};

use serde::Serialize;

use mapquery_lib::{BoundingBox, MapIndex, RasterPlan, RoutePlan, SearchResults};

use crate::args::OutputFormat;
use crate::terminal::{format_with_separators, ColorPalette};

/// Extension appended to tile names in listings.
pub const TILE_EXTENSION: &str = "png";

/// Size and extent of a loaded map, printed by `info`.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub vertices: usize,
    pub edges: usize,
    pub names: usize,
    pub distinct_names: usize,
    pub root: BoundingBox,
    pub max_depth: u8,
    pub tile_size: u32,
}

impl MapSummary {
    pub fn from_index(map: &MapIndex) -> Self {
        Self {
            vertices: map.graph().vertex_count(),
            edges: map.graph().edge_count(),
            names: map.names().len(),
            distinct_names: map.names().key_count(),
            root: map.config().root,
            max_depth: map.tiles().max_depth(),
            tile_size: map.tiles().tile_size(),
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

pub fn render_route<W: Write>(
    out: &mut W,
    plan: &RoutePlan,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, plan);
    }

    let p = palette;
    writeln!(
        out,
        "{}Route{} ({}, {} hops, distance {:.6}):",
        p.white_bold,
        p.reset,
        plan.algorithm,
        plan.hop_count(),
        plan.distance
    )?;
    for (step, (id, coordinate)) in plan.steps.iter().zip(&plan.coordinates).enumerate() {
        let branch = if step + 1 == plan.steps.len() {
            "└─"
        } else {
            "├─"
        };
        writeln!(
            out,
            "{}{}{} {}{}{} {}({}){}",
            p.gray, branch, p.reset, p.cyan, id, p.reset, p.gray, coordinate, p.reset
        )?;
    }
    Ok(())
}

pub fn render_tiles<W: Write>(
    out: &mut W,
    plan: &RasterPlan,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, plan);
    }

    let p = palette;
    let grid = &plan.grid;
    writeln!(
        out,
        "{}Depth {}{} ({} x {} tiles, {} x {} px)",
        p.white_bold,
        grid.depth,
        p.reset,
        grid.cols(),
        grid.rows(),
        plan.raster_width,
        plan.raster_height
    )?;
    writeln!(out, "{}Bounds:{} {}", p.gray, p.reset, grid.bounds)?;
    if grid.clamped {
        writeln!(out, "{}note:{} resolution limited by the deepest level", p.gray, p.reset)?;
    }
    if !plan.query_success {
        writeln!(out, "{}note:{} query does not overlap the map", p.gray, p.reset)?;
    }
    for row in grid.file_names(TILE_EXTENSION) {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

pub fn render_search<W: Write>(
    out: &mut W,
    results: &SearchResults,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, results);
    }

    let p = palette;
    if results.is_empty() {
        return writeln!(out, "{}No matches.{}", p.gray, p.reset);
    }
    match results {
        SearchResults::Names(names) => {
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        SearchResults::Locations(locations) => {
            for location in locations {
                writeln!(
                    out,
                    "{}{}{} {}#{} ({:.6},{:.6}){}",
                    p.white_bold,
                    location.name,
                    p.reset,
                    p.gray,
                    location.id,
                    location.lat,
                    location.lon,
                    p.reset
                )?;
            }
        }
    }
    Ok(())
}

pub fn render_info<W: Write>(
    out: &mut W,
    summary: &MapSummary,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, summary);
    }

    let p = palette;
    let rows = [
        ("Vertices", format_with_separators(summary.vertices)),
        ("Edges", format_with_separators(summary.edges)),
        ("Named places", format_with_separators(summary.names)),
        ("Distinct names", format_with_separators(summary.distinct_names)),
        ("Root", summary.root.to_string()),
        ("Max depth", summary.max_depth.to_string()),
        ("Tile size", format!("{} px", summary.tile_size)),
    ];
    for (label, value) in rows {
        writeln!(out, "{}{:<15}{} {}{}{}", p.gray, label, p.reset, p.green, value, p.reset)?;
    }
    Ok(())
}
