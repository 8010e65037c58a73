//! Blocking I/O run inside `IoTaskPool` tasks.

use std::io::Read;
use std::path::Path;

use bevy::log::{debug, info};
use image::DynamicImage;

use crate::annotation::Annotation;

use super::error::StoreError;
use super::record::{AnnotationRecord, SIDECAR_VERSION, SidecarContents, SidecarFile};
use super::source::ImageSource;

/// Largest image accepted over HTTP
const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

pub fn read_image_bytes(source: &ImageSource) -> Result<Vec<u8>, StoreError> {
    match source {
        ImageSource::Path(path) => std::fs::read(path).map_err(|e| StoreError::io(path, e)),
        ImageSource::Url(url) => {
            let response = ureq::get(url)
                .set("User-Agent", "thermoscope")
                .call()?;
            let mut bytes = Vec::new();
            response
                .into_reader()
                .take(MAX_DOWNLOAD_BYTES)
                .read_to_end(&mut bytes)
                .map_err(|e| StoreError::Http(e.to_string()))?;
            debug!("Downloaded {} bytes from {}", bytes.len(), url);
            Ok(bytes)
        }
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, StoreError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Read the sidecar. A missing file means no annotations yet.
pub fn load_annotations(path: &Path) -> Result<Vec<Annotation>, StoreError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No annotation file at {:?}", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    let contents: SidecarContents = serde_json::from_str(&json)?;
    Ok(contents.into_annotations())
}

/// Write the list and read it back; the re-read list is the authoritative reply.
pub fn save_annotations(
    path: &Path,
    image: &str,
    annotations: &[Annotation],
) -> Result<Vec<Annotation>, StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let file = SidecarFile {
        version: SIDECAR_VERSION,
        image: image.to_string(),
        detections: annotations.iter().map(AnnotationRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
    info!("Wrote {} annotations to {:?}", annotations.len(), path);

    load_annotations(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Provenance;
    use bevy::math::Vec2;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "thermoscope_{}_{}",
            name,
            uuid::Uuid::new_v4().simple()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> Annotation {
        Annotation {
            id: "det_1".into(),
            class_label: "faulty".into(),
            confidence: 0.91,
            center: Vec2::new(120.0, 110.0),
            size: Vec2::new(40.0, 40.0),
            provenance: Provenance::UserEdited,
            comments: None,
            created_at: None,
            created_by: None,
            modified_at: Some(Utc.with_ymd_and_hms(2025, 3, 4, 10, 30, 0).unwrap()),
            modified_by: Some("alice".into()),
        }
    }

    #[test]
    fn test_missing_sidecar_is_empty() {
        let dir = temp_dir("missing");
        let result = load_annotations(&dir.join("nothing.annotations.json")).unwrap();
        assert!(result.is_empty());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_replies_with_persisted_list() {
        let dir = temp_dir("save");
        let path = dir.join("nested").join("t1.annotations.json");

        let persisted = save_annotations(&path, "t1.jpg", &[sample()]).unwrap();
        assert_eq!(persisted, vec![sample()]);
        assert_eq!(load_annotations(&path).unwrap(), vec![sample()]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_sidecar_is_json_error() {
        let dir = temp_dir("corrupt");
        let path = dir.join("bad.annotations.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_annotations(&path), Err(StoreError::Json(_))));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_read_missing_local_image() {
        let source = ImageSource::Path(PathBuf::from("/nonexistent/thermoscope/t.png"));
        assert!(matches!(
            read_image_bytes(&source),
            Err(StoreError::Io { .. })
        ));
    }
}
