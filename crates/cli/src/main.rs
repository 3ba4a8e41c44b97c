//! RV32IM teaching simulator CLI.
//!
//! Non-interactive driver for the simulator core:
//! 1. **asm:** Assemble a source file and print the listing.
//! 2. **run:** Assemble and execute on either engine, with hazard-handling
//!    toggles, breakpoints, and a statistics report.

use std::process;

use clap::{Parser, Subcommand};

use rv32_core::core::StepOutcome;
use rv32_core::isa::decode;
use rv32_core::{Config, Mode, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "RV32IM teaching simulator",
    long_about = "Assemble RISC-V RV32IM source and run it on a single-cycle or a \
five-stage pipelined model.\n\nExamples:\n  rv32sim asm programs/factorial.s\n  \
rv32sim run programs/factorial.s --mode pipeline --stats\n  rv32sim run demo.s \
--mode pipeline --no-forwarding --stats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file and print the listing.
    Asm {
        /// Path to the assembly source file.
        input: String,
        /// Also print the symbol table.
        #[arg(long)]
        symbols: bool,
    },

    /// Assemble and run a source file.
    Run {
        /// Path to the assembly source file.
        input: String,

        /// Execution model.
        #[arg(long, value_enum, default_value = "single")]
        mode: CliMode,

        /// Disable operand forwarding (pipeline mode).
        #[arg(long)]
        no_forwarding: bool,

        /// Disable load-use hazard detection (pipeline mode).
        #[arg(long)]
        no_hazard_detection: bool,

        /// Breakpoint addresses or symbols; execution pauses there.
        #[arg(long = "break", value_name = "ADDR")]
        breakpoints: Vec<String>,

        /// Print the statistics report after the run.
        #[arg(long)]
        stats: bool,

        /// Dump all registers after the run.
        #[arg(long)]
        regs: bool,

        /// Dump 64 bytes of memory at this address or symbol after the run.
        #[arg(long, value_name = "ADDR")]
        mem: Option<String>,

        /// JSON configuration file (flags override it).
        #[arg(long)]
        config: Option<String>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CliMode {
    /// One instruction per cycle.
    Single,
    /// Five-stage pipeline.
    Pipeline,
}

impl From<CliMode> for Mode {
    fn from(m: CliMode) -> Self {
        match m {
            CliMode::Single => Mode::Single,
            CliMode::Pipeline => Mode::Pipeline,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Asm { input, symbols } => cmd_asm(&input, symbols),
        Commands::Run {
            input,
            mode,
            no_forwarding,
            no_hazard_detection,
            breakpoints,
            stats,
            regs,
            mem,
            config,
        } => cmd_run(
            &input,
            mode.into(),
            no_forwarding,
            no_hazard_detection,
            &breakpoints,
            stats,
            regs,
            mem.as_deref(),
            config.as_deref(),
        ),
    }
}

/// Assembles `input` and prints an address/word/disassembly listing.
fn cmd_asm(input: &str, symbols: bool) {
    let result = rv32_core::asm::assemble_file(input);

    if !result.success {
        eprintln!("Assembly failed:");
        for err in &result.errors {
            eprintln!("  {}", err);
        }
        process::exit(1);
    }

    for (i, &word) in result.text.iter().enumerate() {
        let addr = result.text_base + (i as u32) * 4;
        let ins = decode(word, addr);
        let src = result
            .source_map
            .get(&addr)
            .map(|s| format!("  ; {}", s.trim()))
            .unwrap_or_default();
        println!("{:#010x}: {:08x}  {:<24}{}", addr, word, ins.text, src);
    }

    if !result.data.is_empty() {
        println!();
        println!(
            "data: {} byte(s) at {:#010x}",
            result.data.len(),
            result.data_base
        );
    }

    if symbols {
        println!();
        println!("Symbols:");
        for (name, addr) in &result.symbols {
            println!("  {:#010x}  {}", addr, name);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    input: &str,
    mode: Mode,
    no_forwarding: bool,
    no_hazard_detection: bool,
    breakpoints: &[String],
    stats: bool,
    regs: bool,
    mem_dump: Option<&str>,
    config_path: Option<&str>,
) {
    let mut sim = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("cannot read config {}: {}", path, e);
                process::exit(1);
            });
            let config = Config::from_json(&text).unwrap_or_else(|e| {
                eprintln!("invalid config {}: {}", path, e);
                process::exit(1);
            });
            Simulator::with_config(&config)
        }
        None => Simulator::new(),
    };

    sim.set_mode(mode);
    if no_forwarding {
        sim.set_forwarding(false);
    }
    if no_hazard_detection {
        sim.set_hazard_detection(false);
    }

    if let Err(e) = sim.load_file(input) {
        eprintln!("{}", e);
        process::exit(1);
    }

    for bp in breakpoints {
        match sim.resolve_address(bp) {
            Some(addr) => {
                sim.add_breakpoint(addr);
                log::info!("breakpoint at {:#010x}", addr);
            }
            None => {
                eprintln!("cannot resolve breakpoint: {}", bp);
                process::exit(1);
            }
        }
    }

    loop {
        match sim.run() {
            StepOutcome::Halted => break,
            StepOutcome::Paused => {
                println!("Breakpoint hit at PC={:#010x}", sim.pc());
                // Non-interactive driver: report and continue.
            }
            StepOutcome::Running => unreachable!("run only returns on halt or pause"),
        }
    }

    println!("Halted at PC={:#010x}", sim.pc());
    println!("a0 = {}", sim.exit_value());

    if regs {
        sim.regs.dump();
    }
    if let Some(target) = mem_dump {
        match sim.resolve_address(target) {
            Some(addr) => sim.mem.dump(addr, 64),
            None => eprintln!("cannot resolve address: {}", target),
        }
    }
    if stats {
        sim.stats().print();
    }

    process::exit((sim.exit_value() & 0x7F) as i32);
}
