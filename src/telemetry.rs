use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "shared_config_service=info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter;
/// `log_format = "json"` switches to structured output.
pub fn init_tracing(log_format: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log_format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
