use pingrank::probe_engine::SystemPing;
use pingrank::ranking::rank_outcomes;
use pingrank::report::render;
use pingrank::runtime::run_all;
use pingrank::settings::load_from_cli;
use pingrank::storage::{self, CatalogSource};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn invalid_input(err: impl ToString) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pingrank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = load_from_cli().map_err(invalid_input)?;

    let (catalog, source) =
        storage::load_catalog(settings.catalog_path.as_deref()).map_err(invalid_input)?;
    match &source {
        CatalogSource::File(path) => {
            tracing::info!(path = %path.display(), targets = catalog.len(), "loaded catalog")
        }
        CatalogSource::Builtin => {
            tracing::info!(targets = catalog.len(), "using built-in catalog")
        }
    }

    let runner = SystemPing::locate().map_err(invalid_input)?;
    tracing::info!(
        program = %runner.program().display(),
        platform = ?runner.platform(),
        "using system ping"
    );
    let results = run_all(&runner, catalog.targets(), &settings.probe).map_err(invalid_input)?;
    let rows = rank_outcomes(&results, catalog.targets());
    tracing::info!(
        usable = rows.iter().filter(|row| row.is_usable()).count(),
        total = rows.len(),
        "ranking complete"
    );

    let rendered = render(&rows, settings.format).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
