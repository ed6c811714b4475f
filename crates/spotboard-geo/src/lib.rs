//! spotboard-geo: county overlay for the spot map.
//! Reads county boundary placemarks from KML, writes the GeoJSON
//! FeatureCollection the map colours by county, and locates fixes within
//! those boundaries.

pub mod error;
pub mod geojson;
pub mod kml;
pub mod locate;

pub use error::GeoError;
pub use geojson::{Feature, FeatureCollection, Geometry, to_feature_collection};
pub use kml::{CountyBoundary, parse_kml};
pub use locate::{find_county, grid_square};

use std::path::Path;

/// Load county boundaries from a KML file.
pub fn read_boundaries(kml_path: &Path) -> Result<Vec<CountyBoundary>, GeoError> {
    let kml = std::fs::read_to_string(kml_path).map_err(|source| GeoError::Io {
        path: kml_path.to_path_buf(),
        source,
    })?;
    parse_kml(&kml)
}

/// Convert a county KML file into a GeoJSON file. Returns the number of
/// counties written.
pub fn convert_file(kml_path: &Path, geojson_path: &Path) -> Result<usize, GeoError> {
    let counties = read_boundaries(kml_path)?;
    let collection = to_feature_collection(&counties);
    let json = serde_json::to_string_pretty(&collection)?;
    std::fs::write(geojson_path, json + "\n").map_err(|source| GeoError::Io {
        path: geojson_path.to_path_buf(),
        source,
    })?;
    Ok(counties.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://earth.google.com/kml/2.1">
<Document>
  <Placemark>
    <name>Fauquier=FAU 1</name>
    <Polygon><outerBoundaryIs><LinearRing><coordinates>
      -77.9,38.8,0
      -77.6,38.9,0
      -77.7,38.5,0
    </coordinates></LinearRing></outerBoundaryIs></Polygon>
  </Placemark>
</Document>
</kml>"#;

    #[test]
    fn convert_file_writes_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kml_path = dir.path().join("counties.kml");
        let out_path = dir.path().join("county.geojson");
        std::fs::write(&kml_path, KML).expect("write");

        let n = convert_file(&kml_path, &out_path).expect("convert");
        assert_eq!(n, 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out_path).expect("read")).expect("json");
        assert_eq!(written["type"], "FeatureCollection");
        assert_eq!(written["features"][0]["properties"]["name"], "FAU=Fauquier");
    }

    #[test]
    fn boundaries_from_file_locate_a_fix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kml_path = dir.path().join("counties.kml");
        std::fs::write(&kml_path, KML).expect("write");

        let counties = read_boundaries(&kml_path).expect("read");
        let found = find_county(&counties, [-77.7, 38.75]).expect("inside FAU");
        assert_eq!(found.abbr, "FAU");
        assert!(find_county(&counties, [-76.0, 38.75]).is_none());
    }

    #[test]
    fn convert_missing_file_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = convert_file(&dir.path().join("none.kml"), &dir.path().join("out.json"))
            .expect_err("missing");
        assert!(err.to_string().contains("none.kml"));
    }
}
