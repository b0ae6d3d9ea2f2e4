use crate::config::AppConfig;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber. Gate events and the session banner
/// go to stderr so stdout stays free for the device table and JSON summary.
pub fn init_tracing(config: &AppConfig) {
    let json = config.log_json;
    let _ = TRACING_INIT.get_or_init(|| {
        if json {
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            let _ = tracing::subscriber::set_global_default(subscriber);
        } else {
            let subscriber = tracing_subscriber::fmt()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr)
                .with_target(false)
                .finish();
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
    });
}
