//! Terminal run summary
//!
//! Printed at the very end of every run, after cleanup, regardless of how
//! the run went.

use std::path::PathBuf;
use std::time::Duration;

/// Per-run item tally, updated as the sequencer yields items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Items the sequencer yielded, successful or not
    pub processed: u64,

    /// Items that produced a record
    pub succeeded: u64,

    /// Items dropped because their page never became ready
    pub failed: u64,
}

impl RunTally {
    /// Records one yielded item.
    pub fn record(&mut self, succeeded: bool) {
        self.processed += 1;
        if succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Everything the terminal summary reports.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tally: RunTally,
    pub elapsed: Duration,
    pub run_dir: PathBuf,
    pub artifact: Option<PathBuf>,
}

impl RunSummary {
    /// Prints the summary block to stdout.
    pub fn print(&self) {
        let minutes = self.elapsed.as_secs() / 60;
        let seconds = self.elapsed.as_secs_f64() - (minutes * 60) as f64;

        println!("===================================");
        println!("          RUN SUMMARY");
        println!("===================================");
        println!(
            "Total execution time: {} minutes and {:.2} seconds.",
            minutes, seconds
        );
        println!("Movies processed: {}", self.tally.processed);
        println!("Saved successfully: {}", self.tally.succeeded);
        println!("Extraction failures: {}", self.tally.failed);
        match &self.artifact {
            Some(path) => println!("Consolidated table: {}", path.display()),
            None => println!("Consolidated table: not produced"),
        }
        println!("Artifacts stored in: {}", self.run_dir.display());
        println!("===================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts() {
        let mut tally = RunTally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);

        assert_eq!(tally.processed, 3);
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.failed, 1);
    }

    #[test]
    fn test_empty_tally() {
        let tally = RunTally::default();
        assert_eq!(tally.processed, 0);
        assert_eq!(tally.succeeded + tally.failed, 0);
    }
}
