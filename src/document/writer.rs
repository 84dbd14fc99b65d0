use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ExtractError, ExtractResult};
use crate::record::BodyDocument;

/// Path of the document written for one body
/// `model.sat` gives `model.json`, or `model.<index>.json` when the model holds several bodies.
pub fn output_path(input: &Path, body_index: usize, entity_count: usize) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    if entity_count > 1 {
        name.push(format!(".{}", body_index));
    }
    name.push(".json");
    PathBuf::from(name)
}

/// Tab indented JSON text of a document
pub fn to_json_string(document: &BodyDocument) -> ExtractResult<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    document.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a document to `path`, followed by a newline
pub fn write_document(path: &Path, document: &BodyDocument) -> ExtractResult<()> {
    let mut json = to_json_string(document)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} surfaces to '{}'", document.face_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        let input = Path::new("models/bracket.sat");
        assert_eq!(
            output_path(input, 0, 1),
            PathBuf::from("models/bracket.json")
        );
        assert_eq!(
            output_path(input, 2, 3),
            PathBuf::from("models/bracket.2.json")
        );
        assert_eq!(
            output_path(Path::new("bracket"), 0, 1),
            PathBuf::from("bracket.json")
        );
    }

    #[test]
    fn empty_document() {
        let json = to_json_string(&BodyDocument::default()).unwrap();
        assert!(json.contains("\t\"count\": 0"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["shape"]["type"], "surface");
        assert_eq!(value["shape"]["data"], serde_json::json!([]));
    }

    #[test]
    fn unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        assert!(matches!(
            write_document(&path, &BodyDocument::default()),
            Err(ExtractError::Io { .. })
        ));
    }
}
