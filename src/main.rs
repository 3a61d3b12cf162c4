//! House price form, driven from standard input.
//!
//! Each non-blank line is one submission of the form as a JSON object;
//! omitted fields keep the form defaults. One result line is printed per
//! submission.
//!
//! ```text
//! $ echo '{"area": 4200, "furnishingstatus": "unfurnished"}' | house-price-estimator
//! Estimated House Price: ₹ 7,037,305
//! ```

use anyhow::Context;
use house_price_estimator::collector;
use house_price_estimator::config::{EstimatorConfig, CONFIG_FILE};
use house_price_estimator::{HousePriceEstimator, RawInputs};
use std::io::{self, BufRead, Write};
use tracing::{error, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .init();

    let config = EstimatorConfig::load_or_default(CONFIG_FILE)
        .with_context(|| format!("reading {}", CONFIG_FILE))?;
    let estimator =
        HousePriceEstimator::load(&config).context("cannot serve predictions without artifacts")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading standard input")?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = submit(&estimator, &line);
        match outcome {
            Ok(message) => writeln!(out, "{}", message)?,
            Err(err) => {
                error!(line = line_no + 1, error = %err, "prediction failed");
                writeln!(out, "Prediction failed: {:#}", err)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

fn submit(estimator: &HousePriceEstimator, line: &str) -> anyhow::Result<String> {
    let raw: RawInputs = serde_json::from_str(line).context("malformed form submission")?;
    collector::validate(&raw)?;
    Ok(estimator.estimate(&raw)?.message)
}
