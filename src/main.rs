use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tsh::Interpreter;

fn main() -> Result<()> {
    // Traces go to stderr, away from builtin output; silent unless
    // RUST_LOG enables something.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    Interpreter::default().repl()
}
