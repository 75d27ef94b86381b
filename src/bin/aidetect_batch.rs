use aidetect_lib::models::BatchDetectRequest;
use aidetect_lib::services::detect_batch;
use aidetect_lib::{has_flag, init_logging, load_config, parse_arg_value, AiDetector};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || has_flag(&args, "--help") {
        eprintln!(
            "Usage:\n  aidetect-batch <FILE> <FILE>... [--config-dir <dir>] [--out <json_path>]\n\n\
             Scores 2 to 100 files concurrently and prints the batch response as JSON."
        );
        return Ok(());
    }

    init_logging();

    let config = load_config(&args)?;
    let out = parse_arg_value(&args, "--out");

    let value_flags = ["--config-dir", "--out"];
    let paths: Vec<&String> = args
        .iter()
        .enumerate()
        .filter(|(i, a)| !a.starts_with("--") && !(*i > 0 && value_flags.contains(&args[i - 1].as_str())))
        .map(|(_, a)| a)
        .collect();

    let mut texts = Vec::with_capacity(paths.len());
    for path in &paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {path}"))?;
        texts.push(text);
    }
    info!(files = paths.len(), "batch.inputs_loaded");

    let detector = Arc::new(AiDetector::from_config(&config.detection)?);
    let response = detect_batch(
        detector,
        BatchDetectRequest { texts },
        config.detection.max_input_chars,
    )
    .await?;

    let json = serde_json::to_string_pretty(&response)?;
    match out {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("writing {path}"))?;
            info!(path = %path, "batch.written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
