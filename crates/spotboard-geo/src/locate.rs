//! Position lookups: which county a fix falls in, and its Maidenhead grid.

use crate::kml::CountyBoundary;

impl CountyBoundary {
    /// Whether `[lon, lat]` lies inside the boundary (even-odd rule over all
    /// rings, so an inner ring cuts a hole).
    pub fn contains(&self, [x, y]: [f64; 2]) -> bool {
        let mut inside = false;
        for ring in &self.rings {
            for edge in ring.windows(2) {
                let ([x1, y1], [x2, y2]) = (edge[0], edge[1]);
                if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn first_vertex(&self) -> Option<[f64; 2]> {
        self.rings.first().and_then(|ring| ring.first()).copied()
    }
}

/// The county a fix at `[lon, lat]` is in.
///
/// `None` for the `0,0` fix a receiver reports without a position, and for a
/// point outside every boundary. Where boundaries overlap (an independent
/// city drawn inside its county), the one that does not enclose the others
/// wins; when that does not settle it, the first match does.
pub fn find_county(boundaries: &[CountyBoundary], point: [f64; 2]) -> Option<&CountyBoundary> {
    if point == [0.0, 0.0] {
        return None;
    }

    let matches: Vec<&CountyBoundary> = boundaries.iter().filter(|b| b.contains(point)).collect();
    if matches.len() <= 1 {
        return matches.first().copied();
    }

    let innermost = matches.iter().rev().find(|candidate| {
        matches.iter().any(|other| {
            !std::ptr::eq(*other, **candidate)
                && other
                    .first_vertex()
                    .is_some_and(|vertex| !candidate.contains(vertex))
        })
    });
    innermost.or(matches.first()).copied()
}

/// Six-character Maidenhead locator (e.g. `FM18lv`) for `[lon, lat]`.
/// `None` outside lon `[-180, 180)` / lat `[-90, 90)`.
pub fn grid_square([lon, lat]: [f64; 2]) -> Option<String> {
    if !(-180.0..180.0).contains(&lon) || !(-90.0..90.0).contains(&lat) {
        return None;
    }

    let x = lon + 180.0;
    let y = lat + 90.0;

    // Field: 20° x 10°, square: 2° x 1°, subsquare: 5' x 2.5'.
    let field_x = (x / 20.0).floor();
    let field_y = (y / 10.0).floor();
    let square_x = ((x - field_x * 20.0) / 2.0).floor();
    let square_y = (y - field_y * 10.0).floor();
    let sub_x = ((x - field_x * 20.0 - square_x * 2.0) * 12.0).floor();
    let sub_y = ((y - field_y * 10.0 - square_y) * 24.0).floor();

    let letter = |base: u8, n: f64| char::from(base + n.clamp(0.0, 23.0) as u8);
    Some(format!(
        "{}{}{}{}{}{}",
        letter(b'A', field_x),
        letter(b'A', field_y),
        square_x as u8,
        square_y as u8,
        letter(b'a', sub_x),
        letter(b'a', sub_y),
    ))
}
