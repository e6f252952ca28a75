//! Platform-backed capture stack.
//!
//! Implements the collaborator contracts on top of nokhwa, with JPEG
//! encoding delegated to the image crate. These are the implementations the
//! CLI wires in; tests use fakes instead.

use std::path::Path;

use image::{ImageBuffer, Rgb};
use log::info;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::{query, Camera};

use super::service::{CaptureService, DeviceEnumerator};
use super::types::{CameraError, DeviceDescriptor};

/// Enumerates video devices through nokhwa's auto-selected backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformEnumerator;

impl DeviceEnumerator for PlatformEnumerator {
    async fn list_video_devices(&self) -> Result<Vec<DeviceDescriptor>, CameraError> {
        let devices =
            query(ApiBackend::Auto).map_err(|e| CameraError::EnumerationFailed(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|d| DeviceDescriptor {
                id: d.index().as_index().unwrap_or(0).to_string(),
                name: d.human_name(),
                description: d.description().to_string(),
            })
            .collect())
    }
}

/// Capture service backed by a nokhwa [`Camera`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformCaptureService;

impl CaptureService for PlatformCaptureService {
    type Handle = Camera;

    async fn initialize(&self, device_id: &str) -> Result<Camera, CameraError> {
        let index: u32 = device_id.parse().map_err(|_| {
            CameraError::InitializationFailed(format!("invalid device id '{}'", device_id))
        })?;

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| classify_open_error(&e.to_string()))?;

        let resolution = camera.resolution();
        info!(
            "Camera {} opened at {}x{}",
            index,
            resolution.width(),
            resolution.height()
        );
        Ok(camera)
    }

    async fn start_preview(&self, handle: &mut Camera) -> Result<(), CameraError> {
        handle
            .open_stream()
            .map_err(|e| CameraError::PreviewStartFailed(e.to_string()))
    }

    async fn stop_preview(&self, handle: &mut Camera) -> Result<(), CameraError> {
        handle
            .stop_stream()
            .map_err(|e| CameraError::PreviewStopFailed(e.to_string()))
    }

    async fn capture_still(&self, handle: &mut Camera, dest: &Path) -> Result<(), CameraError> {
        // Photos are allowed without a running preview: open the stream just
        // for the shot and put it back the way it was.
        let was_streaming = handle.is_stream_open();
        if !was_streaming {
            handle
                .open_stream()
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        }

        let result = capture_frame(handle, dest);

        if !was_streaming {
            let _ = handle.stop_stream();
        }
        result
    }

    fn release(&self, handle: Camera) {
        // Dropping the camera closes any open stream and the device itself.
        drop(handle);
    }
}

fn capture_frame(camera: &mut Camera, dest: &Path) -> Result<(), CameraError> {
    let frame = camera
        .frame()
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
    let decoded = frame
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
            CameraError::CaptureFailed("frame size does not match reported dimensions".to_string())
        })?;

    // The destination carries a .jpg extension, so the image crate encodes
    // the buffer as JPEG.
    buffer
        .save(dest)
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

    info!("Photo saved to {} ({}x{})", dest.display(), width, height);
    Ok(())
}

/// Classify a device-open failure as denied authorization or a general
/// setup failure. nokhwa reports both through one error type, so the message
/// text is the only signal available.
fn classify_open_error(message: &str) -> CameraError {
    let msg = message.to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("not authorized")
    {
        CameraError::PermissionDenied
    } else {
        CameraError::InitializationFailed(message.to_string())
    }
}
