use log::info;

#[allow(unused_imports)]
use crate::Llrb;

// LLRB height is bounded by 2*log2(n), a usize keyed tree never goes
// past this.
const MAX_DEPTH: usize = 256;

/// Depth of every nil link reached while walking the [`Llrb`] tree,
/// gathered by [`Llrb::validate`]. Nil links stand in for the leaves of
/// the equivalent 2-3 tree, so their spread shows how close the tree is
/// to its ideal height.
#[derive(Clone)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    histogram: [u64; MAX_DEPTH],
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        if self.samples == 0 || depth < self.min {
            self.min = depth
        }
        if depth > self.max {
            self.max = depth
        }
        self.samples += 1;
        self.total += depth;
        self.histogram[depth.min(MAX_DEPTH - 1)] += 1;
    }

    /// Return number of nil links sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the shallowest nil link.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return the deepest nil link.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average depth, zero when nothing was sampled.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return (percentile, depth) pairs from the 90th percentile upward,
    /// one pair for each depth that crosses a new percentile.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles = vec![];
        let (mut acc, mut prev) = (0_u64, 90_u8);
        for (depth, &n) in self.histogram.iter().enumerate() {
            if n == 0 {
                continue;
            }
            acc += n;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev {
                percentiles.push((perc, depth));
                prev = perc;
            }
        }
        percentiles
    }

    /// Log depth statistics at info level, each line tagged with `prefix`.
    pub fn log(&self, prefix: &str) {
        info!(
            "{}depth (min, avg, max): {:?}",
            prefix,
            (self.min, self.mean(), self.max)
        );
        for (perc, depth) in self.percentiles().into_iter() {
            info!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            samples: 0,
            min: 0,
            max: 0,
            total: 0,
            histogram: [0; MAX_DEPTH],
        }
    }
}

impl std::fmt::Debug for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Depth")
            .field("samples", &self.samples)
            .field("min", &self.min)
            .field("mean", &self.mean())
            .field("max", &self.max)
            .finish()
    }
}
