//! Text and JSON rendering of a lookup run

use std::io::{self, Write};

use memocache::StatsSnapshot;
use serde::Serialize;

/// One `get` call and how it was served
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    pub key: String,
    pub value: i32,
    pub hit: bool,
}

/// Everything printed at the end of a run
#[derive(Debug, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub cached: usize,
    pub lookups: Vec<Lookup>,
    pub stats: StatsSnapshot,
}

impl Report {
    /// Tab-separated lookups followed by a one-line summary
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for lookup in &self.lookups {
            let outcome = if lookup.hit { "hit" } else { "miss" };
            writeln!(out, "{}\t{}\t{}", lookup.key, lookup.value, outcome)?;
        }

        writeln!(
            out,
            "capacity={} cached={} misses={} hits={} evictions={} hit_ratio={:.3}",
            self.capacity,
            self.cached,
            self.stats.misses,
            self.stats.hits,
            self.stats.evictions,
            self.stats.hit_ratio
        )
    }

    /// Pretty-printed JSON document
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}
