//! GeoJSON output types for the county overlay.

use serde::{Deserialize, Serialize};

use crate::kml::CountyBoundary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// `ABBR=County`, the key the map's county styling looks up.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Feature {
    fn county(id: usize, county: &CountyBoundary) -> Self {
        Self {
            kind: "Feature".to_string(),
            id: id.to_string(),
            properties: Properties {
                name: format!("{}={}", county.abbr, county.name),
            },
            geometry: Geometry::Polygon {
                coordinates: county.rings.clone(),
            },
        }
    }
}

/// One feature per county, ids numbered from 1 in input order.
pub fn to_feature_collection(counties: &[CountyBoundary]) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features: counties
            .iter()
            .enumerate()
            .map(|(i, county)| Feature::county(i + 1, county))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(name: &str, abbr: &str) -> CountyBoundary {
        CountyBoundary {
            name: name.to_string(),
            abbr: abbr.to_string(),
            rings: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let fc = to_feature_collection(&[county("Fauquier", "FAU"), county("Loudoun", "LOU")]);
        let ids: Vec<&str> = fc.features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn property_name_is_abbr_first() {
        let fc = to_feature_collection(&[county("Fauquier", "FAU")]);
        assert_eq!(fc.features[0].properties.name, "FAU=Fauquier");
    }

    #[test]
    fn serializes_as_geojson() {
        let fc = to_feature_collection(&[county("Fauquier", "FAU")]);
        let json = serde_json::to_value(&fc).expect("json");
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["id"], "1");
        assert_eq!(json["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0][1][0], 1.0);
    }

    #[test]
    fn empty_input_empty_collection() {
        let fc = to_feature_collection(&[]);
        assert!(fc.features.is_empty());
        let json = serde_json::to_string(&fc).expect("json");
        assert_eq!(json, r#"{"type":"FeatureCollection","features":[]}"#);
    }
}
