/// Namespace variable classification.
///
/// Host environments expose their live variable bindings as a snapshot of
/// `NamespaceValue`s. The set of shapes is closed: deciding whether a
/// variable can be attached to a vision request is a total function over
/// these variants, not a runtime attribute probe.
use serde::{Deserialize, Serialize};

/// Raw image bytes plus their MIME type, ready for a vision request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    pub fn png(data: Vec<u8>) -> Self {
        Self { mime_type: "image/png".to_string(), data }
    }
}

/// A snapshot of one host variable, tagged by data shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NamespaceValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// An n-dimensional array. Hosts that can rasterize the array attach a
    /// rendered preview so it can be shown to a vision model.
    NdArray {
        shape: Vec<usize>,
        rendered: Option<ImageAttachment>,
    },
    Image(ImageAttachment),
    /// Anything the host could not map onto a known shape.
    Opaque { type_name: String },
}

impl NamespaceValue {
    /// Whether this variable should be treated as image data: a known image
    /// container, or an array with 2 or 3 dimensions (grayscale / RGB).
    pub fn is_image_like(&self) -> bool {
        match self {
            NamespaceValue::Image(_) => true,
            NamespaceValue::NdArray { shape, .. } => (2..=3).contains(&shape.len()),
            _ => false,
        }
    }

    /// The attachment to send along with a vision request, when one exists.
    pub fn as_image(&self) -> Option<&ImageAttachment> {
        match self {
            NamespaceValue::Image(att) => Some(att),
            NamespaceValue::NdArray { rendered, .. } => rendered.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_with_2_or_3_dims_are_image_like() {
        let gray = NamespaceValue::NdArray { shape: vec![512, 512], rendered: None };
        let rgb = NamespaceValue::NdArray { shape: vec![512, 512, 3], rendered: None };
        let stack = NamespaceValue::NdArray { shape: vec![10, 3, 512, 512], rendered: None };
        assert!(gray.is_image_like());
        assert!(rgb.is_image_like());
        assert!(!stack.is_image_like());
    }

    #[test]
    fn scalars_are_never_image_like() {
        assert!(!NamespaceValue::Text("blobs.tif".into()).is_image_like());
        assert!(!NamespaceValue::Number(42.0).is_image_like());
        assert!(!NamespaceValue::Opaque { type_name: "DataFrame".into() }.is_image_like());
    }

    #[test]
    fn as_image_returns_rendered_preview_only() {
        let bare = NamespaceValue::NdArray { shape: vec![64, 64], rendered: None };
        assert!(bare.is_image_like());
        assert!(bare.as_image().is_none());

        let att = ImageAttachment::png(vec![1, 2, 3]);
        let with_preview = NamespaceValue::NdArray {
            shape: vec![64, 64],
            rendered: Some(att.clone()),
        };
        assert_eq!(with_preview.as_image(), Some(&att));
    }
}
