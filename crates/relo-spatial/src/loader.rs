//! CSV obstacle loader.
//!
//! # CSV format
//!
//! One row per spherical obstacle:
//!
//! ```csv
//! x,y,z,radius,kind
//! 10.0,0.0,10.0,1.5,solid
//! 14.0,0.0,8.0,3.0,liquid
//! ```
//!
//! **`kind`** is one of `solid`, `liquid`, `dynamic`, `trigger`.  Radii must be
//! finite and positive; coordinates must be finite.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use relo_core::{ObstacleKind, Vec3};

use crate::{Obstacle, ObstacleField, ObstacleFieldBuilder, SpatialError, SpatialResult};

#[derive(Deserialize)]
struct ObstacleRecord {
    x:      f32,
    y:      f32,
    z:      f32,
    radius: f32,
    kind:   String,
}

/// Load an [`ObstacleField`] from a CSV file.
pub fn load_obstacles_csv(path: &Path) -> SpatialResult<ObstacleField> {
    let file = std::fs::File::open(path)?;
    load_obstacles_reader(file)
}

/// Like [`load_obstacles_csv`] but accepts any `Read` source.
pub fn load_obstacles_reader<R: Read>(reader: R) -> SpatialResult<ObstacleField> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = ObstacleFieldBuilder::new();

    for (i, result) in csv_reader.deserialize::<ObstacleRecord>().enumerate() {
        // Row 1 is the header.
        let row = i + 2;
        let rec = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        builder.add(parse_record(rec, row)?);
    }

    tracing::debug!(obstacles = builder.len(), "obstacles.loaded");
    Ok(builder.build())
}

fn parse_record(rec: ObstacleRecord, row: usize) -> SpatialResult<Obstacle> {
    let kind = ObstacleKind::parse(&rec.kind).ok_or_else(|| SpatialError::InvalidObstacle {
        row,
        reason: format!(
            "unknown kind {:?}: expected \"solid\", \"liquid\", \"dynamic\", or \"trigger\"",
            rec.kind
        ),
    })?;
    let obstacle = Obstacle::new(Vec3::new(rec.x, rec.y, rec.z), rec.radius, kind);
    match obstacle.defect() {
        Some(reason) => Err(SpatialError::InvalidObstacle { row, reason }),
        None => Ok(obstacle),
    }
}
