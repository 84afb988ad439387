//! memoprobe - memoized key lookups from the command line

mod report;

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use memocache::MemoCache;
use memosource::{HashedSource, ProbeConfig, ValueSource, WebProbeSource};
use tracing::{debug, info};

use crate::report::{Lookup, Report};

/// Where values for uncached keys come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Standard 32-bit string hash of the key
    Hash,
    /// HTTP status code of a GET to the key as URL, -1 on failure
    Web,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Value source consulted on a miss
    #[arg(short, long, value_enum, default_value_t = SourceKind::Hash)]
    source: SourceKind,

    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Request timeout in milliseconds (web source)
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Report 3xx statuses instead of following redirects (web source)
    #[arg(long)]
    no_redirects: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Keys to look up in order; read one per line from stdin when empty
    keys: Vec<String>,
}

fn build_source(args: &Args) -> Result<Box<dyn ValueSource<String, i32>>> {
    let source: Box<dyn ValueSource<String, i32>> = match args.source {
        SourceKind::Hash => Box::new(HashedSource::new()),
        SourceKind::Web => Box::new(
            WebProbeSource::with_config(ProbeConfig {
                timeout: Duration::from_millis(args.timeout_ms),
                follow_redirects: !args.no_redirects,
                ..ProbeConfig::default()
            })
            .context("Failed to initialize web probe source")?,
        ),
    };
    Ok(source)
}

fn read_keys<R: BufRead>(input: R) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read key from stdin")?;
        if !line.trim().is_empty() {
            keys.push(line);
        }
    }
    Ok(keys)
}

fn run<S>(cache: &mut MemoCache<String, i32, S>, keys: Vec<String>) -> Vec<Lookup>
where
    S: ValueSource<String, i32>,
{
    keys.into_iter()
        .map(|key| {
            let misses = cache.num_misses();
            let value = cache.get(key.clone());
            let hit = cache.num_misses() == misses;
            debug!("{} -> {} ({})", key, value, if hit { "hit" } else { "miss" });
            Lookup { key, value, hit }
        })
        .collect()
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    info!("Starting memoprobe v{}", env!("CARGO_PKG_VERSION"));
    info!("Source: {:?}", args.source);
    info!("Cache capacity: {}", args.capacity);

    let source = build_source(&args)?;
    let mut cache = MemoCache::new(source, args.capacity)
        .with_context(|| format!("Cannot build cache with capacity {}", args.capacity))?;

    let keys = if args.keys.is_empty() {
        read_keys(io::stdin().lock())?
    } else {
        args.keys.clone()
    };
    info!("Looking up {} keys", keys.len());

    let lookups = run(&mut cache, keys);
    let report = Report {
        capacity: cache.capacity(),
        cached: cache.len(),
        lookups,
        stats: cache.stats().snapshot(),
    };

    let mut stdout = io::stdout().lock();
    if args.json {
        report.write_json(&mut stdout)?;
    } else {
        report.write_text(&mut stdout)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memosource::string_hash;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["memoprobe", "a", "b"]);

        assert_eq!(args.source, SourceKind::Hash);
        assert_eq!(args.capacity, 3);
        assert_eq!(args.timeout_ms, 10_000);
        assert!(!args.json);
        assert_eq!(args.keys, vec!["a", "b"]);
    }

    #[test]
    fn test_args_web_source() {
        let args = Args::parse_from([
            "memoprobe",
            "--source",
            "web",
            "--capacity",
            "5",
            "--no-redirects",
            "--json",
        ]);

        assert_eq!(args.source, SourceKind::Web);
        assert_eq!(args.capacity, 5);
        assert!(args.no_redirects);
        assert!(args.json);
        assert!(args.keys.is_empty());
    }

    #[test]
    fn test_read_keys_skips_blank_lines() {
        let input = io::Cursor::new("1\n\n   \n3\r\n");
        let keys = read_keys(input).unwrap();
        assert_eq!(keys, vec!["1", "3"]);
    }

    #[test]
    fn test_read_keys_keeps_surrounding_whitespace() {
        let input = io::Cursor::new("a\n a\na \n");
        let keys = read_keys(input).unwrap();
        assert_eq!(keys, vec!["a", " a", "a "]);

        let args = Args::parse_from(["memoprobe"]);
        let mut cache = MemoCache::<String, i32, _>::new(build_source(&args).unwrap(), args.capacity).unwrap();
        let lookups = run(&mut cache, keys);
        assert!(lookups.iter().all(|l| !l.hit));
        assert_eq!(cache.num_misses(), 3);
    }

    #[test]
    fn test_build_web_source() {
        let args = Args::parse_from(["memoprobe", "--source", "web", "--timeout-ms", "250"]);
        let mut source = build_source(&args).unwrap();

        assert_eq!(source.fetch(&"file://".to_string()), -1);
        assert_eq!(source.invocations(), 1);
    }

    #[test]
    fn test_run_marks_hits() {
        let args = Args::parse_from(["memoprobe", "--capacity", "2"]);
        let mut cache = MemoCache::<String, i32, _>::new(build_source(&args).unwrap(), args.capacity).unwrap();

        let keys = ["1", "2", "1", "3", "2"].map(String::from).to_vec();
        let lookups = run(&mut cache, keys);

        let hits: Vec<bool> = lookups.iter().map(|l| l.hit).collect();
        assert_eq!(hits, vec![false, false, true, false, false]);
        assert_eq!(lookups[2].value, string_hash("1"));
        assert_eq!(cache.num_misses(), 4);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let args = Args::parse_from(["memoprobe", "--capacity", "0"]);
        assert!(MemoCache::<String, i32, _>::new(build_source(&args).unwrap(), args.capacity).is_err());
    }
}
