//! usb-camera command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use usb_camera::camera::{
    CameraSession, DeviceEnumerator, InitOutcome, PlatformCaptureService, PlatformEnumerator,
    TempDirStorage,
};
use usb_camera::config::Config;

#[derive(Parser)]
#[command(
    name = "usb-camera",
    version,
    about = "Capture photos from the first attached webcam"
)]
struct Cli {
    /// Path to a config file (defaults to ~/.config/usb-camera/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached video-capture devices
    ListDevices,
    /// Open the first attached camera and save a single photo
    Snap,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::ListDevices => {
            let devices = PlatformEnumerator.list_video_devices().await?;
            if devices.is_empty() {
                println!("No video-capture devices found.");
            }
            for device in &devices {
                println!("{}", device);
            }
        }
        Commands::Snap => {
            let storage = match config.storage.dir {
                Some(dir) => TempDirStorage::new(dir),
                None => TempDirStorage::in_os_temp(),
            };
            let mut session =
                CameraSession::new(PlatformEnumerator, PlatformCaptureService, storage)
                    .with_photo_prefix(config.storage.prefix);

            match session.initialize().await? {
                InitOutcome::Initialized => {}
                InitOutcome::NoDeviceFound => {
                    return Err("no camera found; connect a webcam and try again".into());
                }
                outcome => {
                    return Err(format!("camera session not ready: {:?}", outcome).into());
                }
            }

            let photo = session.capture_photo().await?;
            println!("{}", photo.path.display());
            session.dispose();
        }
    }

    Ok(())
}
