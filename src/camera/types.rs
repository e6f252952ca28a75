//! Camera types and data structures.

use std::fmt;
use std::path::PathBuf;

/// Information about an available video-capture device.
///
/// Produced by a [`crate::camera::DeviceEnumerator`]; consumed once during
/// device selection and not retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Opaque device id understood by the capture service
    pub id: String,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.name, self.description)
    }
}

/// Handle to a photo persisted in temporary storage.
///
/// Ownership of the file passes to the caller. The storage area offers no
/// retention guarantee: the data existed when the capture returned, but the
/// system may clean it up at any later point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Location of the saved JPEG
    pub path: PathBuf,
}

/// Outcome of [`crate::camera::CameraSession::initialize`].
///
/// The non-success variants are reported conditions, not errors: the caller
/// can branch on them (retry later, prompt the user) without error machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A device was found and the capture session is ready
    Initialized,
    /// Device enumeration returned no video-capture devices
    NoDeviceFound,
    /// The session already holds a live handle; nothing was done
    AlreadyInitialized,
    /// The session has been disposed; construct a new instance instead
    Disposed,
}

impl InitOutcome {
    /// True only for [`InitOutcome::Initialized`].
    pub fn is_success(self) -> bool {
        matches!(self, InitOutcome::Initialized)
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug)]
pub enum CameraError {
    /// No capture session is held (not initialized, or already disposed)
    NotInitialized,
    /// The preview stream is already running
    AlreadyPreviewing,
    /// The preview stream is not running
    NotPreviewing,
    /// Failed to query video-capture devices
    EnumerationFailed(String),
    /// Camera authorization was not granted by the host environment
    PermissionDenied,
    /// Session setup failed (device busy, absent, driver error)
    InitializationFailed(String),
    /// Failed to start the preview stream
    PreviewStartFailed(String),
    /// Failed to stop the preview stream
    PreviewStopFailed(String),
    /// Failed to capture or encode a still frame
    CaptureFailed(String),
    /// Failed to create or write the photo file
    Storage(std::io::Error),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NotInitialized => write!(f, "Camera session is not initialized"),
            CameraError::AlreadyPreviewing => write!(f, "Camera preview is already running"),
            CameraError::NotPreviewing => write!(f, "Camera preview is not running"),
            CameraError::EnumerationFailed(msg) => {
                write!(f, "Failed to query video devices: {}", msg)
            }
            CameraError::PermissionDenied => {
                write!(
                    f,
                    "Camera permission denied. Grant camera access in the system privacy settings"
                )
            }
            CameraError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize capture session: {}", msg)
            }
            CameraError::PreviewStartFailed(msg) => {
                write!(f, "Failed to start camera preview stream: {}", msg)
            }
            CameraError::PreviewStopFailed(msg) => {
                write!(f, "Failed to stop camera preview stream: {}", msg)
            }
            CameraError::CaptureFailed(msg) => write!(f, "Failed to capture photo: {}", msg),
            CameraError::Storage(e) => write!(f, "Photo storage error: {}", e),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_descriptor_display() {
        let device = DeviceDescriptor {
            id: "0".to_string(),
            name: "Test Camera".to_string(),
            description: "USB".to_string(),
        };
        assert_eq!(format!("{}", device), "[0] Test Camera (USB)");
    }

    #[test]
    fn test_init_outcome_is_success() {
        assert!(InitOutcome::Initialized.is_success());
        assert!(!InitOutcome::NoDeviceFound.is_success());
        assert!(!InitOutcome::AlreadyInitialized.is_success());
        assert!(!InitOutcome::Disposed.is_success());
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(
            format!("{}", CameraError::NotInitialized),
            "Camera session is not initialized"
        );
        assert_eq!(
            format!("{}", CameraError::EnumerationFailed("test".to_string())),
            "Failed to query video devices: test"
        );
        assert_eq!(
            format!("{}", CameraError::InitializationFailed("busy".to_string())),
            "Failed to initialize capture session: busy"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert_eq!(
            format!("{}", CameraError::PreviewStartFailed("test".to_string())),
            "Failed to start camera preview stream: test"
        );
        assert_eq!(
            format!("{}", CameraError::PreviewStopFailed("test".to_string())),
            "Failed to stop camera preview stream: test"
        );
        assert_eq!(
            format!("{}", CameraError::CaptureFailed("test".to_string())),
            "Failed to capture photo: test"
        );
    }

    #[test]
    fn test_camera_error_storage_source() {
        use std::error::Error;

        let err = CameraError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(matches!(err, CameraError::Storage(_)));
        assert!(err.source().is_some());
        assert!(format!("{}", err).contains("disk full"));
    }
}
