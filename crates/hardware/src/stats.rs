//! Simulation statistics collection and reporting.
//!
//! Tracks what the machine has done so far:
//! 1. **Retirement:** Committed instruction count and per-class mix.
//! 2. **Branch prediction:** Resolutions, mispredictions, and accuracy.
//! 3. **Issue pressure:** Cycles where issue was skipped and why.

/// Counters gathered while the machine runs.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Instructions retired with an architectural effect (no-ops and the
    /// final HALT are not counted).
    pub instructions_retired: u64,
    /// Retired integer ALU instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Stores drained to memory.
    pub inst_store: u64,
    /// Retired branches and jumps.
    pub inst_branch: u64,
    /// Conditional branches resolved at commit.
    pub branch_resolutions: u64,
    /// Resolved branches whose speculative next PC was wrong.
    pub branch_mispredictions: u64,
    /// Issue cycles skipped because the target station pool was full.
    pub issue_stalls_station: u64,
    /// Issue cycles skipped because the reorder buffer was full.
    pub issue_stalls_rob: u64,
}

impl SimStats {
    /// Fraction of resolved branches that were predicted correctly.
    /// Returns 1.0 when no branch has resolved yet.
    pub fn branch_accuracy(&self) -> f64 {
        if self.branch_resolutions == 0 {
            return 1.0;
        }
        1.0 - self.branch_mispredictions as f64 / self.branch_resolutions as f64
    }

    /// Prints a human-readable summary to stdout.
    pub fn print(&self, cycles: u32) {
        println!("=== Simulation statistics ===");
        println!("  cycles:                {}", cycles);
        println!("  instructions retired:  {}", self.instructions_retired);
        if cycles != 0 {
            println!(
                "  CPI:                   {:.2}",
                cycles as f64 / self.instructions_retired.max(1) as f64
            );
        }
        println!("  instruction mix:");
        println!("    alu:    {}", self.inst_alu);
        println!("    load:   {}", self.inst_load);
        println!("    store:  {}", self.inst_store);
        println!("    branch: {}", self.inst_branch);
        println!("  branch prediction:");
        println!("    resolved:      {}", self.branch_resolutions);
        println!("    mispredicted:  {}", self.branch_mispredictions);
        println!("    accuracy:      {:.1}%", self.branch_accuracy() * 100.0);
        println!("  issue stalls:");
        println!("    station pool full: {}", self.issue_stalls_station);
        println!("    rob full:          {}", self.issue_stalls_rob);
    }
}
