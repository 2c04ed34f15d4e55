//! Simulation core: the machine state and its micro-architectural tables.
//!
//! 1. **Machine:** State container and the commit/advance/issue cycle driver.
//! 2. **ROB:** Circular in-order retirement queue.
//! 3. **Stations:** Per-unit operand capture and the common data bus.
//! 4. **Scoreboard:** Register-to-producer rename tracking.
//! 5. **BTB:** Branch target buffer with 2-bit dynamic history.

/// Branch target buffer.
pub mod btb;

/// Machine state and cycle driver.
pub mod machine;

/// Reorder buffer.
pub mod rob;

/// Register-status table.
pub mod scoreboard;

/// Reservation stations and execution units.
pub mod station;

pub use btb::{BranchHistory, BranchTargetBuffer, BtbEntry};
pub use machine::MachineState;
pub use rob::{InstrStatus, ReorderBuffer, RobEntry};
pub use scoreboard::Scoreboard;
pub use station::{ExecUnit, Operand, Station, Stations};
