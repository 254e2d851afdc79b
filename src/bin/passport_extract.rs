use std::path::PathBuf;
use clap::Parser;
use passport_ocr::PassportExtractor;

/// Run the extraction pipeline on a single image and print the record as JSON.
#[derive(Parser)]
#[command(name = "passport_extract")]
struct Args {
    /// Passport page image (any format the image crate can decode)
    image: PathBuf,

    /// Tesseract data directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    tessdata: Option<String>,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    lang: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let image_bytes = match std::fs::read(&args.image) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Failed to read {:?}: {}", args.image, err);
            std::process::exit(1);
        }
    };

    let extractor = PassportExtractor::with_tesseract(args.tessdata, &args.lang);
    match extractor.extract(&image_bytes) {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Failed to serialize record: {}", err);
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("Error processing image: {}", err);
            std::process::exit(1);
        }
    }
}
