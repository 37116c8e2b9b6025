use anyhow::{Context, Result};
use std::{env, process};
use tablematch::{
    loader::{load_queries, load_query, load_table_text},
    Settings, TableLookup,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

const CONFIG_ENV: &str = "TABLEMATCH_CONFIG";

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} lookup  <table.csv> <query.json>", program);
    eprintln!("  {} average <table.csv> <queries.json>", program);
    eprintln!();
    eprintln!("Settings (YAML) are read from ${} when set.", CONFIG_ENV);
    process::exit(2);
}

fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout carries results only) ──────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) arguments ────────────────────────────────────────────────
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("tablematch");
    if args.len() != 4 {
        usage(program);
    }
    let (command, table_path, query_path) = (&args[1], &args[2], &args[3]);

    // ─── 3) settings ─────────────────────────────────────────────────
    let settings = match env::var_os(CONFIG_ENV) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("loading settings from ${}", CONFIG_ENV))?,
        None => Settings::default(),
    };
    debug!(?settings, "settings");
    let engine = TableLookup::with_settings(settings);

    // ─── 4) run ──────────────────────────────────────────────────────
    let text = load_table_text(table_path)?;
    let result = match command.as_str() {
        "lookup" => {
            let query = load_query(query_path)?;
            engine
                .lookup(&query, &text)
                .with_context(|| format!("lookup in {}", table_path))?
        }
        "average" => {
            let queries = load_queries(query_path)?;
            engine
                .weighted_average(&queries, &text)
                .with_context(|| format!("weighted average over {}", table_path))?
        }
        other => {
            eprintln!("unknown command `{}`", other);
            usage(program);
        }
    };

    info!(command = %command, result = %result, "done");
    println!("{}", result);
    Ok(())
}
