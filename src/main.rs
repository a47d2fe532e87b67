//! PDF Image Extractor CLI
//!
//! Command-line interface for extracting embedded images from PDFs.

use clap::Parser;
use pdf_image_extract::{file_ops::extract_pdf_file, ExtractOptions, GrayRowLayout};
use std::path::PathBuf;

/// Extract raster images embedded in a PDF into standalone image files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PDF file path
    #[arg(short, long)]
    input: PathBuf,

    /// Directory to write extracted images into
    #[arg(short, long, default_value = "extracted_images")]
    output_dir: PathBuf,

    /// Treat 1-bit grayscale rows as continuously packed bits instead of
    /// byte-aligned rows
    #[arg(long)]
    packed_gray_rows: bool,

    /// Suppress per-page and per-image progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let options = ExtractOptions {
        gray_rows: if args.packed_gray_rows {
            GrayRowLayout::Packed
        } else {
            GrayRowLayout::ByteAligned
        },
        verbose: !args.quiet,
    };

    println!("PDF Image Extractor");
    println!("===================");

    let summary = extract_pdf_file(&args.input, &args.output_dir, &options)?;

    println!(
        "\nDone! Found {} images on {} pages: {} extracted, {} skipped",
        summary.images_found, summary.pages, summary.images_extracted, summary.images_skipped
    );
    println!("Output saved to: {:?}", args.output_dir);

    Ok(())
}
