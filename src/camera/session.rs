//! Camera session state machine.

use std::mem;

use chrono::Utc;
use log::{error, warn};

use super::service::{CaptureService, DeviceEnumerator};
use super::storage::{photo_base_name, PhotoStorage};
use super::types::{CameraError, CapturedImage, InitOutcome};

/// Default prefix for photo file names.
pub const DEFAULT_PHOTO_PREFIX: &str = "IMG";

/// Externally observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Initialized,
    Previewing,
    Disposed,
}

enum State<H> {
    Uninitialized,
    Initialized(H),
    Previewing(H),
    Disposed,
}

/// Stateful facade over a platform capture service.
///
/// Guards the sequencing of device discovery, session setup, preview
/// streaming, and photo capture, and translates platform failures into
/// logged, typed errors. The session handle is owned exclusively by one
/// instance; `&mut self` on every operation rules out concurrent misuse of
/// a single instance at compile time.
///
/// Lifecycle: created uninitialized, populated by a successful
/// [`initialize`](Self::initialize), torn down by [`dispose`](Self::dispose).
/// A disposed session cannot be reused; construct a new instance instead.
pub struct CameraSession<E, S, T>
where
    S: CaptureService,
{
    enumerator: E,
    service: S,
    storage: T,
    photo_prefix: String,
    state: State<S::Handle>,
}

impl<E, S, T> CameraSession<E, S, T>
where
    E: DeviceEnumerator,
    S: CaptureService,
    T: PhotoStorage,
{
    /// Create an uninitialized session over the given collaborators.
    pub fn new(enumerator: E, service: S, storage: T) -> Self {
        Self {
            enumerator,
            service,
            storage,
            photo_prefix: DEFAULT_PHOTO_PREFIX.to_string(),
            state: State::Uninitialized,
        }
    }

    /// Set the prefix used for photo file names (default `"IMG"`).
    pub fn with_photo_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.photo_prefix = prefix.into();
        self
    }

    /// Discover the first attached video-capture device and open a capture
    /// session on it.
    ///
    /// Device selection takes the first entry of the enumerator's sequence;
    /// there is no preference logic or fallback. An empty sequence is a
    /// reported condition ([`InitOutcome::NoDeviceFound`]), not an error.
    /// Calling again while a handle is held is a no-op returning
    /// [`InitOutcome::AlreadyInitialized`]; after [`dispose`](Self::dispose)
    /// it is a no-op returning [`InitOutcome::Disposed`].
    ///
    /// # Errors
    /// * [`CameraError::EnumerationFailed`] - the device query itself failed
    /// * [`CameraError::PermissionDenied`] - capture authorization not granted
    /// * [`CameraError::InitializationFailed`] - any other setup failure
    pub async fn initialize(&mut self) -> Result<InitOutcome, CameraError> {
        match self.state {
            State::Uninitialized => {}
            State::Disposed => {
                warn!("Camera session already disposed; construct a new session instead");
                return Ok(InitOutcome::Disposed);
            }
            _ => {
                warn!("Camera session already initialized; ignoring");
                return Ok(InitOutcome::AlreadyInitialized);
            }
        }

        let devices = match self.enumerator.list_video_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                error!("Failed to enumerate video devices: {}", e);
                return Err(e);
            }
        };

        let Some(device) = devices.into_iter().next() else {
            warn!("No camera found");
            return Ok(InitOutcome::NoDeviceFound);
        };

        match self.service.initialize(&device.id).await {
            Ok(handle) => {
                self.state = State::Initialized(handle);
                Ok(InitOutcome::Initialized)
            }
            Err(e) => {
                error!("Failed to initialize capture session for '{}': {}", device.name, e);
                Err(e)
            }
        }
    }

    /// Begin the live preview stream.
    ///
    /// Valid once initialized. On failure the error is logged and propagated
    /// and the session stays initialized (not previewing).
    ///
    /// # Errors
    /// * [`CameraError::NotInitialized`] - no session handle is held
    /// * [`CameraError::AlreadyPreviewing`] - the preview is already running
    /// * [`CameraError::PreviewStartFailed`] - the platform refused the stream
    pub async fn start_preview(&mut self) -> Result<(), CameraError> {
        match mem::replace(&mut self.state, State::Uninitialized) {
            State::Initialized(mut handle) => {
                match self.service.start_preview(&mut handle).await {
                    Ok(()) => {
                        self.state = State::Previewing(handle);
                        Ok(())
                    }
                    Err(e) => {
                        error!("Failed to start camera preview stream: {}", e);
                        self.state = State::Initialized(handle);
                        Err(e)
                    }
                }
            }
            previewing @ State::Previewing(_) => {
                self.state = previewing;
                Err(CameraError::AlreadyPreviewing)
            }
            other => {
                self.state = other;
                Err(CameraError::NotInitialized)
            }
        }
    }

    /// End the live preview stream.
    ///
    /// The session drops back to initialized even when the platform reports
    /// a failure: stop was requested, so the stream can no longer be assumed
    /// live. Re-issue [`start_preview`](Self::start_preview) if a preview is
    /// still wanted after a failed stop.
    ///
    /// # Errors
    /// * [`CameraError::NotPreviewing`] - the preview is not running
    /// * [`CameraError::PreviewStopFailed`] - the platform failed to stop
    pub async fn stop_preview(&mut self) -> Result<(), CameraError> {
        match mem::replace(&mut self.state, State::Uninitialized) {
            State::Previewing(mut handle) => {
                let result = self.service.stop_preview(&mut handle).await;
                self.state = State::Initialized(handle);
                result.map_err(|e| {
                    error!("Failed to stop camera preview stream: {}", e);
                    e
                })
            }
            other => {
                self.state = other;
                Err(CameraError::NotPreviewing)
            }
        }
    }

    /// Capture a single photo and save it as a JPEG in the storage area.
    ///
    /// Allowed whether or not the preview is running. The file is named
    /// `<prefix>_<UTC timestamp>.jpg`; a name clash gets a numbered suffix
    /// rather than overwriting. A failed capture is logged and propagated
    /// with no retry.
    ///
    /// # Errors
    /// * [`CameraError::NotInitialized`] - no session handle is held
    /// * [`CameraError::Storage`] - the photo file could not be created
    /// * [`CameraError::CaptureFailed`] - the platform capture or encode failed
    pub async fn capture_photo(&mut self) -> Result<CapturedImage, CameraError> {
        let handle = match &mut self.state {
            State::Initialized(handle) | State::Previewing(handle) => handle,
            _ => return Err(CameraError::NotInitialized),
        };

        let base_name = photo_base_name(&self.photo_prefix, Utc::now());
        let path = match self.storage.create_unique_file(&base_name, "jpg") {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to create photo file '{}.jpg': {}", base_name, e);
                return Err(CameraError::Storage(e));
            }
        };

        if let Err(e) = self.service.capture_still(handle, &path).await {
            error!("Failed to capture photo to {}: {}", path.display(), e);
            return Err(e);
        }

        Ok(CapturedImage { path })
    }
}

impl<E, S, T> CameraSession<E, S, T>
where
    S: CaptureService,
{
    /// Whether a capture session is currently held.
    ///
    /// Does not distinguish previewing; see [`status`](Self::status) for the
    /// full state.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Initialized(_) | State::Previewing(_))
    }

    /// Current state of the session.
    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Uninitialized => SessionStatus::Uninitialized,
            State::Initialized(_) => SessionStatus::Initialized,
            State::Previewing(_) => SessionStatus::Previewing,
            State::Disposed => SessionStatus::Disposed,
        }
    }

    /// Release the capture session handle, if held.
    ///
    /// Idempotent: calling on an already-disposed or never-initialized
    /// session does nothing. The session cannot be re-initialized afterwards.
    pub fn dispose(&mut self) {
        match mem::replace(&mut self.state, State::Disposed) {
            State::Initialized(handle) | State::Previewing(handle) => {
                self.service.release(handle);
            }
            State::Uninitialized | State::Disposed => {}
        }
    }
}

impl<E, S, T> Drop for CameraSession<E, S, T>
where
    S: CaptureService,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
