//! Atelier CLI: run the crop-and-upload pipeline from the command line.
//!
//! Storage is configured through the environment (STORAGE_BACKEND,
//! LOCAL_STORAGE_PATH, LOCAL_STORAGE_BASE_URL, STORAGE_BUCKET).

use anyhow::Context;
use clap::{Parser, Subcommand};

use atelier_cli::init_tracing;
use atelier_core::{Config, MediaValidator};
use atelier_processing::{decode_source, render_crop, CropRegion, Flip, OutputFormat};
use atelier_storage::create_storage;
use atelier_studio::Uploader;

#[derive(Parser)]
#[command(name = "atelier", about = "Portfolio media pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a crop of an image, upload it and print the public URL
    Crop {
        /// Path to the source image
        file: std::path::PathBuf,
        /// Crop window left edge, in safe-area pixels
        #[arg(long, default_value = "0")]
        x: u32,
        /// Crop window top edge, in safe-area pixels
        #[arg(long, default_value = "0")]
        y: u32,
        /// Crop window width
        #[arg(long)]
        width: u32,
        /// Crop window height
        #[arg(long)]
        height: u32,
        /// Rotation in degrees
        #[arg(long, default_value = "0")]
        rotation: f64,
        /// Zoom factor, at least 1.0
        #[arg(long, default_value = "1")]
        zoom: f64,
        /// Mirror horizontally
        #[arg(long)]
        flip_h: bool,
        /// Mirror vertically
        #[arg(long)]
        flip_v: bool,
        /// Resample the result to this width
        #[arg(long)]
        output_width: Option<u32>,
        /// Output format: webp, jpeg or png (default from OUTPUT_FORMAT)
        #[arg(long)]
        format: Option<String>,
        /// Destination folder inside the bucket
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print the public URL for an already-stored object path
    Url {
        /// Object path within the configured bucket
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Crop {
            file,
            x,
            y,
            width,
            height,
            rotation,
            zoom,
            flip_h,
            flip_v,
            output_width,
            format,
            folder,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            // Content type comes from sniffing the bytes, not the filename.
            let content_type = image::guess_format(&data)
                .map(|f| f.to_mime_type())
                .context("Unrecognized image format")?;

            let validator = MediaValidator::new(
                config.max_upload_size_bytes,
                config.allowed_content_types.clone(),
            );
            validator.validate_all(content_type, data.len())?;

            let format = OutputFormat::parse(format.as_deref().unwrap_or(&config.output_format))?;
            let output_width = output_width.or(config.output_width);
            let region = CropRegion::new(x, y, width, height)
                .with_zoom(zoom)
                .with_rotation(rotation);
            let flip = Flip {
                horizontal: flip_h,
                vertical: flip_v,
            };

            // Rendering is CPU-bound; keep it off the async runtime.
            let asset = tokio::task::spawn_blocking(move || {
                let source = decode_source(&data)?;
                render_crop(&source, &region, flip, output_width, format)
            })
            .await??;

            tracing::info!(
                width = asset.width,
                height = asset.height,
                size_bytes = asset.data.len(),
                "Rendered crop"
            );

            let storage = create_storage(&config).await?;
            let uploader = Uploader::new(storage, config.bucket.clone());
            let folder = folder.unwrap_or_else(|| config.upload_folder.clone());

            let stored = uploader.upload(&asset, &folder).await?;
            println!("{}", stored.public_url);
        }
        Commands::Url { path } => {
            let storage = create_storage(&config).await?;
            println!("{}", storage.public_url(&config.bucket, &path));
        }
    }

    Ok(())
}
