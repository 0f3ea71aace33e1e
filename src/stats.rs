use std::fmt;

/// Running counters for one map. Lookups count as a hit or a miss, inserts as accepted or
/// rejected. `probes` is the total number of slots inspected across every operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapStats {
    pub hits: usize,
    pub misses: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub removals: usize,
    pub probes: usize,
}

impl MapStats {
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.hits + self.misses)
    }

    pub fn acceptance_rate(&self) -> f64 {
        ratio(self.accepted, self.accepted + self.rejected)
    }

    /// Mean slots inspected per operation.
    pub fn average_probe_length(&self) -> f64 {
        ratio(
            self.probes,
            self.hits + self.misses + self.accepted + self.rejected,
        )
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        return 0.0;
    }
    num as f64 / denom as f64
}

impl fmt::Display for MapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hits: {}", self.hits)?;
        writeln!(f, "Misses: {}", self.misses)?;
        writeln!(f, "Hit Rate: {:.3}", self.hit_rate())?;
        writeln!(f, "Accepted: {}", self.accepted)?;
        writeln!(f, "Rejected: {}", self.rejected)?;
        writeln!(f, "Acceptance Rate: {:.3}", self.acceptance_rate())?;
        writeln!(f, "Removals: {}", self.removals)?;
        write!(f, "Average Probe Length: {:.3}", self.average_probe_length())
    }
}
