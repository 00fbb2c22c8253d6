use kindle_clippings::config::Config;
use kindle_clippings::{db, export, parser, reader};
use std::path::Path;
use tracing::{debug, info};

fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    setup_logging(config.verbose);

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kindle_clippings={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Input: {}", config.input_path);
    debug!("Output: {}", config.output_path);

    let mut clippings = reader::read_clippings(Path::new(&config.input_path))?;

    if let Some(range) = config.date_range {
        let total = clippings.len();
        clippings = parser::filter_by_date(clippings, range.from, range.to);
        info!(
            "Kept {} of {} clippings added between {} and {}",
            clippings.len(),
            total,
            range.from,
            range.to
        );
    }

    export::save_to_csv(Path::new(&config.output_path), &clippings)?;

    if let Some(ref database_path) = config.database_path {
        let conn = db::init_db(Path::new(database_path))?;
        let mut inserted = 0;
        for clipping in &clippings {
            if db::insert_clipping(&conn, clipping)? {
                inserted += 1;
            }
        }
        info!(
            "Stored {} new clippings in {} ({} duplicates skipped)",
            inserted,
            database_path,
            clippings.len() - inserted
        );
    }

    Ok(())
}
