//! CSV persistence of a [`History`].
//!
//! Layout, one record per line:
//!
//! ```text
//! x0,y0,x1,y1,...,xN,yN      all coordinates, depot first
//! 3,1,4                      one record per route of snapshot 0
//! 2,5
//! END                        end of snapshot 0
//! ...
//! ```
//!
//! Empty fields are ignored on read, so files written with a trailing comma
//! on every line load as well.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use super::History;
use crate::error::{CvrpError, Result};
use crate::models::Location;

/// Sentinel record closing a snapshot.
pub const END_MARKER: &str = "END";

/// Writes `history` to `writer`.
///
/// # Examples
///
/// ```
/// use u_cvrp::history::{read_history, write_history};
/// use u_cvrp::models::Instance;
/// use u_cvrp::solver::solve_by_savings;
///
/// let instance = Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0], &[0.0, 0.0], 2).unwrap();
/// let history = solve_by_savings(&instance).unwrap();
///
/// let mut buf = Vec::new();
/// write_history(&history, &mut buf).unwrap();
/// assert_eq!(String::from_utf8(buf.clone()).unwrap(), "0,0,1,0,2,0\n1\n2\nEND\n1,2\nEND\n");
///
/// let back = read_history(buf.as_slice()).unwrap();
/// assert_eq!(back.route_lists(), history.route_lists());
/// ```
pub fn write_history<W: io::Write>(history: &History, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    let coords: Vec<String> = history
        .locations()
        .iter()
        .flat_map(|l| [l.x().to_string(), l.y().to_string()])
        .collect();
    wtr.write_record(&coords)?;

    for snapshot in history.snapshots() {
        for route in snapshot.solution().routes() {
            wtr.write_record(route.customers().iter().map(|c| c.to_string()))?;
        }
        wtr.write_record([END_MARKER])?;
    }
    wtr.flush()?;

    debug!(
        locations = history.locations().len(),
        snapshots = history.len(),
        "history written"
    );
    Ok(())
}

/// Writes `history` to a file at `path`, replacing any existing file.
pub fn write_history_to_path<P: AsRef<Path>>(history: &History, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_history(history, file)
}

/// Reads a history written by [`write_history`].
///
/// Locations are restored with unit customer demand. Every snapshot must
/// be a partition of the customers; see [`History::from_route_lists`].
pub fn read_history<R: io::Read>(reader: R) -> Result<History> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = records
        .next()
        .ok_or_else(|| CvrpError::MalformedHistory("missing location record".into()))??;
    let coords = header
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| {
            f.parse::<f64>()
                .map_err(|_| CvrpError::MalformedHistory(format!("bad coordinate {f:?}")))
        })
        .collect::<Result<Vec<f64>>>()?;
    if coords.len() < 2 || coords.len() % 2 != 0 {
        return Err(CvrpError::MalformedHistory(format!(
            "expected coordinate pairs, found {} values",
            coords.len()
        )));
    }

    let locations: Vec<Location> = coords
        .chunks(2)
        .enumerate()
        .map(|(i, xy)| match i {
            0 => Location::depot(xy[0], xy[1]),
            _ => Location::customer(i, xy[0], xy[1]),
        })
        .collect();

    let mut snapshots: Vec<Vec<Vec<usize>>> = Vec::new();
    let mut current: Vec<Vec<usize>> = Vec::new();
    let mut open = false;

    for record in records {
        let record = record?;
        if record.get(0) == Some(END_MARKER) {
            snapshots.push(std::mem::take(&mut current));
            open = false;
            continue;
        }

        let customers = record
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| {
                f.parse::<usize>()
                    .map_err(|_| CvrpError::MalformedHistory(format!("bad customer index {f:?}")))
            })
            .collect::<Result<Vec<usize>>>()?;
        if customers.is_empty() {
            continue;
        }
        current.push(customers);
        open = true;
    }

    if open {
        return Err(CvrpError::MalformedHistory(
            "last snapshot is missing its END record".into(),
        ));
    }
    History::from_route_lists(locations, snapshots)
}

/// Reads a history from the file at `path`.
pub fn read_history_from_path<P: AsRef<Path>>(path: P) -> Result<History> {
    let file = File::open(path)?;
    read_history(file)
}
