//! Tomasulo pipeline simulator CLI.
//!
//! Loads a pre-assembled program image (flat little-endian 32-bit
//! instruction words), runs the machine until it retires a HALT or hits the
//! cycle limit, and prints statistics plus the modified architectural state.

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};

use tomasim_core::config::Config;
use tomasim_core::sim::loader;
use tomasim_core::MachineState;

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    version,
    about = "Cycle-accurate Tomasulo pipeline simulator",
    long_about = "Run a pre-assembled program image on the out-of-order core.\n\n\
                  The image is a flat sequence of little-endian 32-bit instruction\n\
                  words; it is loaded at word address 16.\n\n\
                  Example:\n  tomasim run -f programs/sum.bin --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image to completion.
    Run {
        /// Program image file.
        #[arg(short, long)]
        file: String,

        /// Stop after this many cycles even without a HALT.
        #[arg(long)]
        limit: Option<u32>,

        /// Seed for the BTB victim-selection generator.
        #[arg(long)]
        seed: Option<u64>,

        /// Emit per-stage trace lines to stderr.
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            file,
            limit,
            seed,
            trace,
        } => cmd_run(&file, limit, seed, trace),
    }
}

/// Runs the simulator: loads the image, then loops on `next_step` until a
/// HALT retires or the cycle limit is reached.
fn cmd_run(file: &str, limit: Option<u32>, seed: Option<u64>, trace: bool) {
    let mut config = Config::default();
    if let Some(seed) = seed {
        config.predictor.seed = seed;
    }
    config.general.trace = trace;

    let mut machine = MachineState::with_config(&config);
    match loader::load_image(&mut machine, Path::new(file)) {
        Ok(words) => println!("[*] Loaded {} words at pc={}", words, machine.pc),
        Err(e) => {
            eprintln!("Error reading image {}: {}", file, e);
            process::exit(1);
        }
    }

    loop {
        if let Some(limit) = limit {
            if machine.cycles >= limit {
                println!("[!] Cycle limit {} reached without HALT", limit);
                break;
            }
        }
        match machine.next_step() {
            Ok(true) => {
                println!("[*] HALT retired at cycle {}", machine.cycles);
                break;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("[!] FATAL: {}", e);
                machine.stats.print(machine.cycles);
                process::exit(1);
            }
        }
    }

    machine.stats.print(machine.cycles);
    dump_state(&machine);
}

/// Prints the nonzero registers and the data words below the program image.
fn dump_state(machine: &MachineState) {
    println!("=== Registers ===");
    for (reg, &value) in machine.reg_file.iter().enumerate() {
        if value != 0 {
            println!("  r{:<2} = {}", reg, value);
        }
    }
    println!("=== Data memory ===");
    for addr in 0..16u32 {
        let value = machine.memory[addr as usize];
        if value != 0 {
            println!("  mem[{}] = {}", addr, value);
        }
    }
}
