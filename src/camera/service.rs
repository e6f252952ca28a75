//! Collaborator contracts for the platform capture stack.
//!
//! The session talks to the platform exclusively through these traits, so
//! tests can substitute fakes without touching real hardware, and so
//! multiple-session contention can be simulated deterministically.

use std::path::Path;

use super::types::{CameraError, DeviceDescriptor};

/// Lists attached video-capture devices.
#[allow(async_fn_in_trait)]
pub trait DeviceEnumerator {
    /// List all video-capture devices.
    ///
    /// Ordering is whatever the platform returns. An empty list means no
    /// camera is attached and is not an error.
    async fn list_video_devices(&self) -> Result<Vec<DeviceDescriptor>, CameraError>;
}

/// Owns the physical camera: session setup, preview streaming, and still
/// capture with JPEG encoding.
///
/// The underlying device is an exclusive resource guarded by the platform;
/// a second session initializing the same device fails at the platform level.
#[allow(async_fn_in_trait)]
pub trait CaptureService {
    /// Opaque resource representing a configured, open connection to a
    /// specific capture device.
    type Handle;

    /// Open a capture session on the device with the given id.
    ///
    /// # Errors
    /// * [`CameraError::PermissionDenied`] - capture authorization not granted
    /// * [`CameraError::InitializationFailed`] - any other setup failure
    ///   (device busy, absent, driver error)
    async fn initialize(&self, device_id: &str) -> Result<Self::Handle, CameraError>;

    /// Begin the live preview stream.
    async fn start_preview(&self, handle: &mut Self::Handle) -> Result<(), CameraError>;

    /// End the live preview stream.
    async fn stop_preview(&self, handle: &mut Self::Handle) -> Result<(), CameraError>;

    /// Capture one still frame, encode it as JPEG, and write it to `dest`.
    async fn capture_still(
        &self,
        handle: &mut Self::Handle,
        dest: &Path,
    ) -> Result<(), CameraError>;

    /// Release the session handle.
    ///
    /// Called at most once per handle; consumes it.
    fn release(&self, handle: Self::Handle);
}
