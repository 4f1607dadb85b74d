//! Part record loading from JSON.
//!
//! The input is a top-level array of records in the same shape as
//! [`PartRecord`]'s serde representation. Every record is validated and ids
//! must be unique within the batch.

use std::path::Path;

use rustc_hash::FxHashSet;

use super::record::PartRecord;
use crate::error::PartPickError;

/// Parse and validate a JSON array of part records.
pub fn parse_parts(json: &str) -> Result<Vec<PartRecord>, PartPickError> {
    let records: Vec<PartRecord> = serde_json::from_str(json)
        .map_err(|e| PartPickError::PartsParse(e.to_string()))?;

    let mut seen = FxHashSet::default();
    for record in &records {
        record.validate()?;
        if !seen.insert(record.id) {
            return Err(PartPickError::DuplicatePart(record.id));
        }
    }

    Ok(records)
}

/// Read and parse a part record file.
pub fn load_parts(path: &Path) -> Result<Vec<PartRecord>, PartPickError> {
    let content = std::fs::read_to_string(path).map_err(PartPickError::Io)?;
    let records = parse_parts(&content)?;
    log::info!("loaded {} parts from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{GeometryKind, PartId};

    const TWO_PARTS: &str = r#"[
        {
            "id": 1,
            "name": "Base plate",
            "geometry": { "type": "box", "width": 4, "height": 0.2, "depth": 3 },
            "position": { "x": 0, "y": 0, "z": 0 },
            "color": { "r": 120, "g": 120, "b": 130, "a": 1 }
        },
        {
            "id": 2,
            "name": "Post",
            "geometry": { "width": 0.3, "height": 2, "depth": 0.3 },
            "position": { "x": 1.5, "y": 1.1, "z": 0 },
            "color": { "r": 200, "g": 40, "b": 40, "a": 0.8 }
        }
    ]"#;

    #[test]
    fn parses_records_in_order() {
        let parts = parse_parts(TWO_PARTS).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].id, PartId(1));
        assert_eq!(parts[1].name, "Post");
        // Missing "type" defaults to box.
        assert_eq!(parts[1].geometry.kind, GeometryKind::Box);
        assert_eq!(parts[1].color.a, 0.8);
    }

    #[test]
    fn unknown_geometry_type_is_a_parse_error() {
        let json = TWO_PARTS.replace("\"box\"", "\"sphere\"");
        assert!(matches!(
            parse_parts(&json),
            Err(PartPickError::PartsParse(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = TWO_PARTS.replace("\"id\": 2", "\"id\": 1");
        assert!(matches!(
            parse_parts(&json),
            Err(PartPickError::DuplicatePart(PartId(1)))
        ));
    }

    #[test]
    fn invalid_record_is_rejected() {
        let json = TWO_PARTS.replace("\"height\": 2", "\"height\": -2");
        assert!(matches!(
            parse_parts(&json),
            Err(PartPickError::InvalidPart { id: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err =
            load_parts(Path::new("does/not/exist/parts.json")).unwrap_err();
        assert!(matches!(err, PartPickError::Io(_)));
    }
}
