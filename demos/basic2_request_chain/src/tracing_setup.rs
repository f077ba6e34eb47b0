use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

pub fn tracing_init() {
    let subscriber = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(false)
        .with_thread_names(false)
        .with_thread_ids(true)
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .with_timer(ShortTime)
        .finish();
    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing already initialised: {error}");
    }
}

/// Wall-clock time of each event, without the date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTime;

impl FormatTime for ShortTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}
