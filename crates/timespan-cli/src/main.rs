use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::debug;
use url::form_urlencoded;

/// Resolve an interval expression or a start/end pair into a UTC range.
///
/// Prints `{"start": ..., "end": ...}` as JSON.
#[derive(Parser, Debug)]
#[command(name = "timespan", version, about)]
struct Cli {
    /// Single interval expression: YYYY, YYYYMM, YYYYMMDD, or an offset like -1w or 1h10s
    #[arg(long, allow_hyphen_values = true)]
    interval: Option<String>,

    /// Start expression; its range start is used
    #[arg(long, allow_hyphen_values = true)]
    start: Option<String>,

    /// End expression; its range end is used
    #[arg(long, allow_hyphen_values = true)]
    end: Option<String>,

    /// Raw query string, e.g. "start=2013&end=2014". Explicit flags win.
    #[arg(long)]
    query: Option<String>,

    /// Anchor instant (RFC 3339) for relative offsets [default: current time]
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Also report whether this instant (RFC 3339) falls inside the range
    #[arg(long, value_parser = parse_now)]
    contains: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// Non-empty flags first, then query pairs, so the first value per key
    /// is the flag.
    fn params(&self) -> Vec<(String, String)> {
        let flags = [
            ("interval", &self.interval),
            ("start", &self.start),
            ("end", &self.end),
        ];
        let mut params: Vec<(String, String)> = flags
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key.to_string(), v.to_string()))
            })
            .collect();

        if let Some(qs) = &self.query {
            params.extend(form_urlencoded::parse(qs.as_bytes()).into_owned());
        }
        params
    }
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 datetime: {e}"))
}

/// Initialize logging from `RUST_LOG` (default `warn`) on stderr.
/// `TIMESPAN_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var("TIMESPAN_LOG_FORMAT").as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let params = cli.params();
    let now = cli.now.unwrap_or_else(Utc::now);
    debug!(?params, %now, "resolving timespan");

    let span = timespan::resolve_timespan_at(&params, now)
        .context("failed to resolve timespan")?;
    debug!(start = %span.start, end = %span.end, "resolved timespan");

    let mut value = serde_json::to_value(span)?;
    if let (Some(instant), Some(fields)) = (cli.contains, value.as_object_mut()) {
        fields.insert("contains".to_string(), span.contains(instant).into());
    }

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}
