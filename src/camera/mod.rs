//! Camera session module for webcam access and photo capture.
//!
//! This module provides a session layer over a platform capture backend:
//! - Collaborator contracts: [`DeviceEnumerator`], [`CaptureService`],
//!   [`PhotoStorage`]
//! - The session state machine: [`CameraSession`]
//! - Platform-backed implementations: [`PlatformEnumerator`],
//!   [`PlatformCaptureService`]

mod platform;
mod service;
mod session;
mod storage;
mod types;

pub use platform::{PlatformCaptureService, PlatformEnumerator};
pub use service::{CaptureService, DeviceEnumerator};
pub use session::{CameraSession, SessionStatus, DEFAULT_PHOTO_PREFIX};
pub use storage::{photo_base_name, PhotoStorage, TempDirStorage};
pub use types::{CameraError, CapturedImage, DeviceDescriptor, InitOutcome};
