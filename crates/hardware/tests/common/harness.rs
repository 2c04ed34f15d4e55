//! Test harness for whole-machine runs.

use tomasim_core::config::Config;
use tomasim_core::MachineState;

/// Wraps a machine with the setup and run loops the scenario tests need.
pub struct TestContext {
    pub machine: MachineState,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Machine with the stock configuration.
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            machine: MachineState::new(),
        }
    }

    /// Machine with a fixed BTB victim-selection seed.
    pub fn with_seed(seed: u64) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut config = Config::default();
        config.predictor.seed = seed;
        Self {
            machine: MachineState::with_config(&config),
        }
    }

    /// Loads a sequence of instruction words at the current PC and sets the
    /// fetch bound one past the last word.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        let mut pc = self.machine.pc;
        for &instr in instructions {
            self.machine.load_instr(pc, instr);
            pc += 1;
        }
        self.machine.set_memory_size(pc);
        self
    }

    /// Seeds a data word below the program image.
    pub fn with_word(mut self, addr: u32, value: u32) -> Self {
        self.machine.memory[addr as usize] = value;
        self
    }

    /// Register file read.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.machine.reg_file[reg]
    }

    /// Memory read.
    pub fn read_mem(&self, addr: u32) -> u32 {
        self.machine.memory[addr as usize]
    }

    /// One cycle. Panics on a decode error; returns true when HALT retired.
    pub fn step(&mut self) -> bool {
        self.machine.next_step().expect("unexpected decode error")
    }

    /// Runs until a HALT retires, panicking if it takes longer than
    /// `max_cycles`. Returns the cycle count at termination.
    pub fn run_to_halt(&mut self, max_cycles: u32) -> u32 {
        for _ in 0..max_cycles {
            if self.step() {
                return self.machine.cycles;
            }
        }
        panic!("machine did not halt within {} cycles", max_cycles);
    }
}
