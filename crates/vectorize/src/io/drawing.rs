// DXF export
// One closed LWPOLYLINE per outline, millimeter units

use std::io::Write;
use std::path::Path;

use dxf::{Drawing, LwPolylineVertex};
use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::enums::{AcadVersion, DrawingUnits, Units};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    error::{Result, VectorizeError},
    types::PhysicalPolyline,
};

/// Build an in-memory drawing holding one closed polyline per input
pub fn build_drawing(polylines: &[PhysicalPolyline]) -> Drawing {
    let mut drawing = Drawing::new();
    // LWPOLYLINE needs R14+, $INSUNITS needs R2000+
    drawing.header.version = AcadVersion::R2010;
    drawing.header.default_drawing_units = Units::Millimeters;
    drawing.header.drawing_units = DrawingUnits::Metric;

    for polyline in polylines {
        let mut entity = LwPolyline::default();
        entity.vertices = polyline
            .points
            .iter()
            .map(|&[x, y]| LwPolylineVertex {
                x,
                y,
                ..Default::default()
            })
            .collect();
        entity.set_is_closed(true);

        drawing.add_entity(Entity::new(EntityType::LwPolyline(entity)));
    }

    drawing
}

/// Write `polylines` to `path` as a millimeter DXF document.
///
/// The drawing is written to a temporary file next to `path` and renamed
/// over it, so `path` is either fully replaced or left as it was.
pub fn write_dxf(polylines: &[PhysicalPolyline], path: &Path) -> Result<()> {
    let drawing = build_drawing(polylines);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    drawing.save(&mut tmp)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    debug!(tmp = %tmp.path().display(), "drawing staged");

    tmp.persist(path).map_err(|e| VectorizeError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    let points: usize = polylines.iter().map(|p| p.points.len()).sum();
    info!(
        polylines = polylines.len(),
        points,
        "wrote DXF to {}",
        path.display()
    );
    Ok(())
}

/// Read back the LWPOLYLINE entities of a DXF file.
///
/// Returns the vertices of each polyline along with its closed flag.
pub fn read_dxf_polylines(path: &Path) -> Result<Vec<(PhysicalPolyline, bool)>> {
    let drawing = Drawing::load_file(path)?;
    let polylines = drawing
        .entities()
        .filter_map(|entity| match &entity.specific {
            EntityType::LwPolyline(lw) => Some((
                PhysicalPolyline {
                    points: lw.vertices.iter().map(|v| [v.x, v.y]).collect(),
                },
                lw.is_closed(),
            )),
            _ => None,
        })
        .collect();
    Ok(polylines)
}

/// Units declared in a DXF file's header
pub fn read_dxf_units(path: &Path) -> Result<Units> {
    let drawing = Drawing::load_file(path)?;
    Ok(drawing.header.default_drawing_units)
}
