//! Run-statistics snapshot and reporting.

use crate::sim::Mode;

/// Counters collected over a run, snapshotted from the active engine.
#[derive(Clone, Copy, Debug)]
pub struct RunStats {
    /// Which engine produced these numbers.
    pub mode: Mode,
    /// Total cycles executed.
    pub cycles: u64,
    /// Instructions committed.
    pub instructions: u64,
    /// Load-use stalls inserted (pipeline only).
    pub stalls: u64,
    /// Latch slots squashed by taken branches (pipeline only).
    pub flushes: u64,
    /// Operand values satisfied by forwarding (pipeline only).
    pub forwards: u64,
    /// Whether load-use stalls were enabled.
    pub hazard_detection: bool,
    /// Whether forwarding was enabled.
    pub forwarding: bool,
    /// Byte reads performed by memory.
    pub mem_reads: u64,
    /// Byte writes performed by memory.
    pub mem_writes: u64,
}

impl RunStats {
    /// Cycles per committed instruction; 0.0 before anything committed.
    pub fn cpi(&self) -> f64 {
        if self.instructions == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions as f64
        }
    }

    /// Prints the statistics report.
    pub fn print(&self) {
        println!("==========================================================");
        println!("SIMULATION STATISTICS");
        println!("==========================================================");
        let mode = match self.mode {
            Mode::Single => "single-cycle",
            Mode::Pipeline => "pipeline",
        };
        println!("mode                     {}", mode);
        println!("cycles                   {}", self.cycles);
        println!("instructions             {}", self.instructions);
        println!("cpi                      {:.2}", self.cpi());
        if self.mode == Mode::Pipeline {
            println!("stalls                   {}", self.stalls);
            println!("flushes                  {}", self.flushes);
            println!("forwards                 {}", self.forwards);
            println!(
                "hazard_detection         {}",
                if self.hazard_detection { "on" } else { "off" }
            );
            println!(
                "forwarding               {}",
                if self.forwarding { "on" } else { "off" }
            );
        }
        println!("mem.reads                {}", self.mem_reads);
        println!("mem.writes               {}", self.mem_writes);
        println!("==========================================================");
    }
}
