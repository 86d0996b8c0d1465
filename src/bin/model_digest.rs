//! Model digest utility.
//!
//! Prints the SHA-256 of a model file and checks that it loads, so the
//! digest can be pinned through `BODYSCOPE_MODEL_SHA256`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin model_digest -- <model.json>
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use bodyscope::adapters::{sha256_hex, LinearRiskModel};
use bodyscope::ports::RiskClassifier;

fn usage() -> &'static str {
    "Usage: model_digest <model.json>"
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(arg), None) if arg != "-h" && arg != "--help" => PathBuf::from(arg),
        _ => bail!(usage()),
    };

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {path:?}"))?;
    let digest = sha256_hex(&bytes);

    // Refuse to print a pin for a file the service would reject anyway.
    let model = LinearRiskModel::load(&path, Some(&digest))
        .with_context(|| format!("{path:?} is not a loadable model"))?;

    eprintln!(
        "Model OK: schema {}, {} features",
        model.schema_version(),
        model.feature_names().len()
    );
    println!("{digest}");
    eprintln!("Pin with: export BODYSCOPE_MODEL_SHA256={digest}");
    Ok(())
}
