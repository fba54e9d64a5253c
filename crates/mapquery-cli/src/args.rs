//! Value parsers and enums shared by the subcommands.

use clap::ValueEnum;

use mapquery_lib::Coordinate;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Parse a `LAT,LON` pair.
///
/// ```
/// use mapquery_cli::args::parse_lat_lon;
///
/// let point = parse_lat_lon("37.87, -122.26").unwrap();
/// assert_eq!(point.lat, 37.87);
/// assert_eq!(point.lon, -122.26);
/// ```
pub fn parse_lat_lon(value: &str) -> Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

    let point = Coordinate::new(lat, lon);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite, got '{value}'"));
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whitespace_around_parts() {
        let point = parse_lat_lon(" 37.8756 ,-122.2587 ").expect("valid pair");
        assert_eq!(point, Coordinate::new(37.8756, -122.2587));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_lat_lon("37.87").is_err());
        assert!(parse_lat_lon("north,-122.26")
            .unwrap_err()
            .contains("latitude"));
        assert!(parse_lat_lon("37.87,west").unwrap_err().contains("longitude"));
        assert!(parse_lat_lon("inf,1.0").unwrap_err().contains("finite"));
    }
}
