//! kycmid CLI - extract the MIDI track embedded in a KYC resource container.

use clap::Parser;
use kycmid_container::{extract_track, track_output_path};
use kycmid_core::error::{KycError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kycmid")]
#[command(version, about = "Extract the MIDI track from a KYC resource container")]
struct Cli {
    /// Input container file
    #[arg(short, long, default_value = "03000.KYC")]
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    println!("kycmid {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli.file) {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(input: &Path) -> Result<()> {
    let data = fs::read(input)?;
    // Extraction either fully succeeds or fails before anything is
    // written; there is never a partial output file.
    let track = extract_track(&data)?;

    let output = track_output_path(input);
    fs::write(&output, &track).map_err(|e| KycError::output_write(output.clone(), e))?;

    println!("{} -> {} ({} bytes)", input.display(), output.display(), track.len());
    Ok(())
}

fn exit_code(error: &KycError) -> i32 {
    match error {
        KycError::Io(_) => 1,
        KycError::MalformedContainer { .. } => 2,
        KycError::UnexpectedEndOfInput { .. } => 3,
        KycError::OutputWrite { .. } => 4,
    }
}
