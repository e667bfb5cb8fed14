use anyhow::{bail, Context, Result};
use hotspot_optimizer::{
    config::LogFormat, models::ResultSetDocument, Config, HotspotKey, HotspotOptimizer,
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load config")?;
    init_tracing(config.log_format);

    let Some(input) = std::env::args().nth(1) else {
        bail!("usage: hotspot-optimizer <result-set.json | ->");
    };

    info!(service = %config.service_name, %input, "Loading result set");

    let parsed = if input == "-" {
        ResultSetDocument::from_reader(io::stdin().lock())
    } else {
        let file = File::open(&input).with_context(|| format!("Failed to open {input}"))?;
        ResultSetDocument::from_reader(BufReader::new(file))
    };
    let document = parsed.context("Failed to parse result set")?;

    let mut results = document
        .into_result_set()
        .context("Invalid result set")?;

    let optimizer = HotspotOptimizer::default();
    info!(rules = ?optimizer.rule_names(), candidates = results.found().len(), "Optimizing");
    optimizer.optimize(&mut results);

    for key in HotspotKey::ALL {
        let hotspot = results.hotspot(key);
        if !hotspot.is_empty() {
            info!(hotspot = %key, members = ?hotspot.member_ids(), "Hotspot filled");
        }
    }

    let output = ResultSetDocument::from(&results);
    let mut stdout = io::stdout().lock();
    if config.pretty_output {
        serde_json::to_writer_pretty(&mut stdout, &output)?;
    } else {
        serde_json::to_writer(&mut stdout, &output)?;
    }
    writeln!(stdout)?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hotspot_optimizer=debug".into());

    // stdout carries the result document; logs go to stderr
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}
