//! Image Classification Example
//!
//! This example demonstrates how to use the labelkit library to classify
//! images against a label dictionary. The crate ships no inference backend,
//! so the example plugs in a stand-in engine that scores each class by the
//! mean intensity of one color channel of the encoded tensor.
//!
//! Usage:
//! ```
//! cargo run --example classify_image -- --labels-path <path_to_labels> <image_paths>...
//! ```

use clap::Parser;
use labelkit::core::{ClassifyResult, InferenceEngine};
use labelkit::predictor::ImageClassifierBuilder;
use labelkit::processors::EncodedTensor;
use labelkit::utils::{LabelSet, init_tracing};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Command-line arguments for the image classification example
#[derive(Parser)]
#[command(name = "classify_image")]
#[command(about = "Image Classification Example - scores images against a label dictionary")]
struct Args {
    /// Path to the label dictionary file (one label per line)
    #[arg(short, long)]
    labels_path: PathBuf,

    /// Image file paths to process
    #[arg(required = true)]
    images: Vec<String>,

    /// Number of top results to show for each image
    #[arg(short, long, default_value_t = 3)]
    top_k: usize,

    /// Square input size to encode images to
    #[arg(long, default_value_t = 224)]
    input_size: u32,
}

/// Stand-in inference backend.
///
/// Scores class `i` with the mean intensity of color channel `i` of the
/// encoded tensor and leaves any remaining classes at zero. It exists to
/// exercise the pipeline without a real model.
struct ChannelMeanEngine {
    num_classes: usize,
}

impl InferenceEngine for ChannelMeanEngine {
    fn run(&self, input: &EncodedTensor) -> ClassifyResult<Vec<u8>> {
        let channels = input.spec().channels;
        let mut sums = vec![0u64; channels];
        for pixel in input.as_bytes().chunks_exact(channels) {
            for (sum, &byte) in sums.iter_mut().zip(pixel) {
                *sum += u64::from(byte);
            }
        }

        let pixels = (input.len() / channels) as u64;
        let mut scores = vec![0u8; self.num_classes];
        for (score, sum) in scores.iter_mut().zip(&sums) {
            *score = (*sum / pixels) as u8;
        }
        Ok(scores)
    }
}

/// Main function for the image classification example
///
/// Loads the label dictionary, builds a classifier around the stand-in
/// engine, and prints the top results for each image.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    init_tracing();

    // Parse command-line arguments
    let args = Args::parse();

    info!("Image Classification Example");

    let labels = LabelSet::from_file(&args.labels_path)?;
    info!(
        "Loaded {} labels from {}",
        labels.len(),
        args.labels_path.display()
    );

    let engine = ChannelMeanEngine {
        num_classes: labels.len(),
    };
    let classifier = ImageClassifierBuilder::new()
        .model_name("channel_mean_demo")
        .top_k(args.top_k)
        .input_shape((args.input_size, args.input_size))
        .labels(labels)
        .build(engine)?;

    for (i, image_path) in args.images.iter().enumerate() {
        // Verify that the image file exists
        if !Path::new(image_path).exists() {
            error!("Image file not found: {}", image_path);
            continue;
        }

        let top = classifier.classify_path(Path::new(image_path))?;

        info!("{}. {}", i + 1, image_path);
        for entry in &top {
            info!("   {}", entry);
        }
    }

    Ok(())
}
