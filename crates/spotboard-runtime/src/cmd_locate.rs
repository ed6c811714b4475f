//! `spotboard locate`: county and grid square for one position.

use spotboard_geo::{CountyBoundary, find_county, grid_square, read_boundaries};

use crate::cli::LocateOpts;

/// Abbreviation reported for a fix outside every boundary.
pub const UNKNOWN_COUNTY: &str = "UNK";

/// `ABBR=County GRID`, or `UNK GRID` outside every boundary.
pub(crate) fn describe_position(boundaries: &[CountyBoundary], point: [f64; 2]) -> String {
    let county = find_county(boundaries, point)
        .map_or_else(|| UNKNOWN_COUNTY.to_string(), |b| format!("{}={}", b.abbr, b.name));
    match grid_square(point) {
        Some(grid) => format!("{county} {grid}"),
        None => county,
    }
}

/// Entry point for `spotboard locate`.
pub fn cmd_locate(opts: &LocateOpts) -> anyhow::Result<()> {
    let boundaries = read_boundaries(&opts.kml)?;
    tracing::debug!("{} boundaries loaded from {}", boundaries.len(), opts.kml.display());
    println!("{}", describe_position(&boundaries, [opts.lon, opts.lat]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(abbr: &str, name: &str, [x0, y0]: [f64; 2]) -> CountyBoundary {
        CountyBoundary {
            name: name.to_string(),
            abbr: abbr.to_string(),
            rings: vec![vec![[x0, y0], [x0 + 1.0, y0], [x0 + 1.0, y0 + 1.0], [x0, y0 + 1.0], [x0, y0]]],
        }
    }

    #[test]
    fn inside_a_county() {
        let counties = vec![county("FAU", "Fauquier", [-78.0, 38.0])];
        assert_eq!(describe_position(&counties, [-77.5, 38.5]), "FAU=Fauquier FM18gm");
    }

    #[test]
    fn outside_every_county() {
        let counties = vec![county("FAU", "Fauquier", [-78.0, 38.0])];
        assert_eq!(describe_position(&counties, [-70.0, 38.5]), "UNK FM58am");
    }

    #[test]
    fn off_the_grid() {
        assert_eq!(describe_position(&[], [200.0, 0.0]), "UNK");
    }
}
