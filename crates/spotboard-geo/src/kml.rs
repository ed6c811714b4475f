//! County boundary placemarks from KML.
//!
//! Placemark names have the form `County=ABBR[ suffix]`, e.g.
//! `Fauquier=FAU 1`. Each `<coordinates>` block is one ring of
//! whitespace-separated `lon,lat[,alt]` tuples.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::warn;

use crate::error::GeoError;

#[derive(Debug, Clone, PartialEq)]
pub struct CountyBoundary {
    /// County or independent city name, e.g. `Fauquier`.
    pub name: String,
    /// Abbreviation used in the spot feed, e.g. `FAU`.
    pub abbr: String,
    /// `[lon, lat]` rings in document order, each closed.
    pub rings: Vec<Vec<[f64; 2]>>,
}

#[derive(Default)]
struct PlacemarkDraft {
    name: String,
    raw_rings: Vec<String>,
}

impl PlacemarkDraft {
    /// `Ok(None)` when the name has no `County=ABBR` shape.
    fn finish(self) -> Result<Option<CountyBoundary>, GeoError> {
        let label = self.name.trim();
        let Some((county, rest)) = label.split_once('=') else {
            warn!("skipping placemark without County=ABBR name: {label:?}");
            return Ok(None);
        };
        let Some(abbr) = rest.split_whitespace().next() else {
            warn!("skipping placemark with empty abbreviation: {label:?}");
            return Ok(None);
        };

        let mut rings = Vec::with_capacity(self.raw_rings.len());
        for raw in &self.raw_rings {
            let ring = parse_ring(raw, label)?;
            if !ring.is_empty() {
                rings.push(ring);
            }
        }

        Ok(Some(CountyBoundary {
            name: county.trim().to_string(),
            abbr: abbr.to_string(),
            rings,
        }))
    }
}

fn parse_ring(raw: &str, placemark: &str) -> Result<Vec<[f64; 2]>, GeoError> {
    let mut ring = Vec::new();
    for tuple in raw.split_whitespace() {
        let mut parts = tuple.split(',');
        let lon = parts.next().and_then(|s| s.parse::<f64>().ok());
        let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
        match (lon, lat) {
            (Some(lon), Some(lat)) => ring.push([lon, lat]),
            _ => {
                return Err(GeoError::InvalidCoordinate {
                    placemark: placemark.to_string(),
                    detail: tuple.to_string(),
                });
            }
        }
    }
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && first != last
    {
        ring.push(first);
    }
    Ok(ring)
}

/// Parse every county placemark in the document, in document order.
pub fn parse_kml(xml: &str) -> Result<Vec<CountyBoundary>, GeoError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut counties = Vec::new();
    let mut current: Option<PlacemarkDraft> = None;
    let mut in_name = false;
    let mut in_coordinates = false;
    let mut coordinates = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Placemark" => current = Some(PlacemarkDraft::default()),
                b"name" => in_name = true,
                b"coordinates" => {
                    in_coordinates = true;
                    coordinates.clear();
                }
                _ => {}
            },
            Event::Text(e) => {
                let text = e.unescape()?;
                if let Some(draft) = current.as_mut() {
                    if in_name {
                        draft.name.push_str(&text);
                    } else if in_coordinates {
                        coordinates.push_str(&text);
                        coordinates.push(' ');
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"name" => in_name = false,
                b"coordinates" => {
                    in_coordinates = false;
                    if let Some(draft) = current.as_mut() {
                        draft.raw_rings.push(std::mem::take(&mut coordinates));
                    }
                }
                b"Placemark" => {
                    if let Some(draft) = current.take()
                        && let Some(county) = draft.finish()?
                    {
                        counties.push(county);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(counties)
}
