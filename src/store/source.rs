//! Where an image comes from and where its annotations are kept.

use std::path::{Path, PathBuf};

/// An image reference as typed or picked by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    /// `http://` and `https://` references are URLs; anything else is a filesystem path.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }

    /// The string stored in config (recent list, last image).
    pub fn to_config_string(&self) -> String {
        match self {
            ImageSource::Path(path) => path.to_string_lossy().into_owned(),
            ImageSource::Url(url) => url.clone(),
        }
    }

    /// Short name for titles and the recent menu.
    pub fn display_name(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            ImageSource::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(url)
                .to_string(),
        }
    }

    /// Sidecar annotation file.
    ///
    /// - Path: `<image stem>.annotations.json` next to the image
    /// - URL: a file named after the sanitized URL under `annotations_dir`
    pub fn sidecar_path(&self, annotations_dir: &Path) -> PathBuf {
        match self {
            ImageSource::Path(path) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                path.with_file_name(format!("{}.annotations.json", stem))
            }
            ImageSource::Url(url) => {
                annotations_dir.join(format!("{}.annotations.json", sanitize(url)))
            }
        }
    }
}

fn sanitize(url: &str) -> String {
    let without_scheme = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    without_scheme
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detects_urls() {
        assert_eq!(
            ImageSource::parse(" https://example.com/t1.jpg "),
            ImageSource::Url("https://example.com/t1.jpg".into())
        );
        assert_eq!(
            ImageSource::parse("HTTP://example.com/a.png"),
            ImageSource::Url("HTTP://example.com/a.png".into())
        );
        assert_eq!(
            ImageSource::parse("/data/thermal/t1.jpg"),
            ImageSource::Path(PathBuf::from("/data/thermal/t1.jpg"))
        );
    }

    #[test]
    fn test_sidecar_next_to_local_image() {
        let source = ImageSource::Path(PathBuf::from("/data/thermal/T-102_maint.jpg"));
        assert_eq!(
            source.sidecar_path(Path::new("/unused")),
            PathBuf::from("/data/thermal/T-102_maint.annotations.json")
        );
    }

    #[test]
    fn test_sidecar_for_url_is_sanitized() {
        let source = ImageSource::Url("https://cdn.example.com/img/t1.jpg?v=2".into());
        assert_eq!(
            source.sidecar_path(Path::new("store")),
            PathBuf::from("store/cdn.example.com_img_t1.jpg_v_2.annotations.json")
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            ImageSource::parse("/a/b/thermal.png").display_name(),
            "thermal.png"
        );
        assert_eq!(
            ImageSource::parse("https://example.com/x/thermal.png").display_name(),
            "thermal.png"
        );
    }
}
