use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Logs go to stderr; stdout is reserved for the report and error line.
pub fn init_logging(verbose: bool) {
    let env = std::env::var("STRESS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let filter = build_filter(env.as_deref(), verbose);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// `--verbose` still raises this crate to debug on top of a user-supplied filter.
fn build_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let Some(filter) = env.and_then(|value| EnvFilter::try_new(value).ok()) else {
        return default_filter(verbose);
    };
    if !verbose {
        return filter;
    }
    match "stress=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("stress=debug,warn")
    } else {
        EnvFilter::new("stress=info,warn")
    }
}
