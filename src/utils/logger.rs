use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset: `--verbose` beats a configured
/// level, which beats the info default.
pub fn filter_directives(verbose: bool, level: Option<&str>) -> String {
    match level {
        _ if verbose => "mega_api=debug,info".to_string(),
        Some(level) => format!("mega_api={}", level),
        None => "mega_api=info".to_string(),
    }
}

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, level)))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Same filtering as the CLI logger, one JSON object per line.
pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_configured_level() {
        assert_eq!(filter_directives(true, Some("warn")), "mega_api=debug,info");
        assert_eq!(filter_directives(true, None), "mega_api=debug,info");
    }

    #[test]
    fn test_configured_level_without_verbose() {
        assert_eq!(filter_directives(false, Some("trace")), "mega_api=trace");
        assert_eq!(filter_directives(false, None), "mega_api=info");
    }
}
