/// Domain errors raised while decoding and normalizing annotation payloads.
///
/// Any of these aborts the whole normalization call; no partial image list
/// is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed {kind} geometry (length {len}): {reason}")]
    MalformedGeometry {
        kind: GeometryKind,
        len: usize,
        reason: String,
    },

    #[error(
        "Unsupported task mode '{0}'. Must be one of: {modes}",
        modes = crate::task::VALID_MODE_STRINGS.join(", ")
    )]
    UnsupportedTaskMode(String),

    #[error("Invalid annotation payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Which flat-array encoding failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    Keypoints,
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polygon => f.write_str("polygon"),
            Self::Keypoints => f.write_str("keypoints"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_mode_message_lists_valid_modes() {
        let err = CoreError::UnsupportedTaskMode("tracking".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported task mode 'tracking'. Must be one of: detection, segmentation, \
             keypoints, detection+segmentation, keypoints+segmentation"
        );
    }

    #[test]
    fn payload_error_converts_from_serde() {
        let serde_err = serde_json::from_str::<Vec<f64>>("{").unwrap_err();
        let err: CoreError = serde_err.into();
        assert!(err.to_string().starts_with("Invalid annotation payload"));
    }

    #[test]
    fn geometry_message_names_kind() {
        let err = CoreError::MalformedGeometry {
            kind: GeometryKind::Polygon,
            len: 3,
            reason: "coordinate array length must be even".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed polygon geometry (length 3): coordinate array length must be even"
        );
    }
}
