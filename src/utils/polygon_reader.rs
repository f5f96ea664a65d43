//! Polygon obstacle text format.
//!
//! Whitespace-separated records, each a vertex count followed by that many
//! `x y` pairs:
//!
//! ```text
//! 3  -2 -2  2 -2  0 4
//! 4  8 -1  10 -1  10 1  8 1
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::common::{PlanningError, PlanningResult, Point2D, Polygon};

/// Parse every polygon record from `reader`
pub fn read_polygons<R: Read>(mut reader: R) -> PlanningResult<Vec<Polygon>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_polygons(&text)
}

/// Parse polygons from a file on disk
pub fn read_polygons_file<P: AsRef<Path>>(path: P) -> PlanningResult<Vec<Polygon>> {
    let file = File::open(path)?;
    read_polygons(BufReader::new(file))
}

/// Parse polygon records from a string
pub fn parse_polygons(text: &str) -> PlanningResult<Vec<Polygon>> {
    let mut tokens = text.split_whitespace();
    let mut polygons = Vec::new();

    while let Some(count_token) = tokens.next() {
        let count: usize = count_token.parse().map_err(|_| {
            PlanningError::ParseError(format!(
                "polygon {}: expected vertex count, found '{}'",
                polygons.len(),
                count_token
            ))
        })?;

        let mut vertices = Vec::with_capacity(count);
        for vertex in 0..count {
            let x = next_coordinate(&mut tokens, polygons.len(), vertex)?;
            let y = next_coordinate(&mut tokens, polygons.len(), vertex)?;
            vertices.push(Point2D::new(x, y));
        }
        polygons.push(Polygon::new(vertices));
    }

    Ok(polygons)
}

fn next_coordinate<'a, I>(tokens: &mut I, polygon: usize, vertex: usize) -> PlanningResult<f64>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or_else(|| {
        PlanningError::ParseError(format!(
            "polygon {}: input ended inside vertex {}",
            polygon, vertex
        ))
    })?;
    token.parse().map_err(|_| {
        PlanningError::ParseError(format!(
            "polygon {}: bad coordinate '{}' at vertex {}",
            polygon, token, vertex
        ))
    })
}
