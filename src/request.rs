use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

/// Largest batch the front end will ask for in one submission.
pub const MAX_VARIATIONS: usize = 10;

/// Which remote capability a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Text,
    Vision,
}

/// Kind of artifact a vision request should describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetKind {
    #[default]
    Image,
    Video,
}

impl TargetKind {
    /// Anything other than `"video"` is treated as an image target.
    pub fn from_context(context: &str) -> Self {
        if context.trim().eq_ignore_ascii_case("video") {
            TargetKind::Video
        } else {
            TargetKind::Image
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Image => "image",
            TargetKind::Video => "video",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw image bytes plus the MIME type sent along with them.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    bytes: Vec<u8>,
    mime: String,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Build an attachment from raw bytes, sniffing the MIME type from the
    /// file signature. Unknown signatures fall back to PNG.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime = sniff_mime(&bytes);
        Self::new(bytes, mime)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read image {}", path.display()))?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "loaded image");
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }
}

// Image bytes are noise in logs.
impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'B', b'M', ..] => "image/bmp",
        _ => "image/png",
    }
}

/// One submission to the scheduler.
///
/// The constructors keep the image/operation invariant: text requests never
/// carry an image and vision requests always run exactly one variation. A
/// vision request may still be built without an image so the job can report
/// the missing input as a fatal error.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    query: String,
    context: String,
    variation_count: usize,
    kind: OperationKind,
    image: Option<ImageAttachment>,
}

impl GenerationRequest {
    /// A text request. A `variation_count` of zero is raised to one.
    pub fn text(query: impl Into<String>, context: impl Into<String>, variation_count: usize) -> Self {
        Self {
            query: query.into(),
            context: context.into(),
            variation_count: variation_count.max(1),
            kind: OperationKind::Text,
            image: None,
        }
    }

    pub fn vision(target: TargetKind, image: Option<ImageAttachment>) -> Self {
        Self {
            query: format!("Generate a {target} prompt from the provided image."),
            context: target.label().to_string(),
            variation_count: 1,
            kind: OperationKind::Vision,
            image,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn variation_count(&self) -> usize {
        match self.kind {
            OperationKind::Text => self.variation_count,
            OperationKind::Vision => 1,
        }
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn target(&self) -> TargetKind {
        TargetKind::from_context(&self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_variations_become_one() {
        let req = GenerationRequest::text("q", "Basic Prompt", 0);
        assert_eq!(req.variation_count(), 1);
    }

    #[test]
    fn vision_request_is_single_variation() {
        let req = GenerationRequest::vision(TargetKind::Video, None);
        assert_eq!(req.kind(), OperationKind::Vision);
        assert_eq!(req.variation_count(), 1);
        assert_eq!(req.context(), "video");
        assert_eq!(req.target(), TargetKind::Video);
        assert!(req.image().is_none());
    }

    #[test]
    fn text_request_has_no_image() {
        let req = GenerationRequest::text("q", "Basic Prompt", 3);
        assert!(req.image().is_none());
        assert_eq!(req.variation_count(), 3);
    }

    #[test]
    fn target_from_context_defaults_to_image() {
        assert_eq!(TargetKind::from_context("Video"), TargetKind::Video);
        assert_eq!(TargetKind::from_context("Basic Prompt"), TargetKind::Image);
    }

    #[test]
    fn sniffs_common_signatures() {
        assert_eq!(ImageAttachment::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).mime(), "image/jpeg");
        assert_eq!(ImageAttachment::from_bytes(b"GIF89a".to_vec()).mime(), "image/gif");
        assert_eq!(ImageAttachment::from_bytes(b"RIFF\0\0\0\0WEBPVP8".to_vec()).mime(), "image/webp");
        assert_eq!(ImageAttachment::from_bytes(b"\x89PNG".to_vec()).mime(), "image/png");
    }

    #[test]
    fn debug_omits_bytes() {
        let img = ImageAttachment::new(vec![1, 2, 3], "image/png");
        let dbg = format!("{img:?}");
        assert!(dbg.contains("size: 3"));
    }
}
