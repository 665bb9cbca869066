use std::io;

use tracing_subscriber::EnvFilter;

use tram_fares::session;

fn main() -> io::Result<()> {
    // Diagnostics go to stderr so the answer stream stays clean;
    // verbosity comes from RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    session::run(stdin.lock(), stdout.lock(), io::stderr())?;
    Ok(())
}
