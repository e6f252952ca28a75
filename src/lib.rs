//! usb-camera library crate.
//!
//! A thin session layer over a platform webcam backend: enumerate attached
//! video-capture devices, open a capture session on the first one, start and
//! stop a live preview, and save single JPEG photos to temporary storage.
//!
//! The actual device I/O, frame capture, and JPEG encoding are performed by
//! collaborator implementations (see [`camera::CaptureService`]); this crate
//! owns the sequencing, the session state machine, file naming, and failure
//! reporting.

pub mod camera;
pub mod config;
