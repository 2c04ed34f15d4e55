//! Program image loader.
//!
//! The core consumes pre-encoded 32-bit instruction words; assembling them
//! is an external concern. The loader reads a flat little-endian word image,
//! places it starting at the machine's current PC, and sets the fetch bound
//! one past the last word.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::MachineState;

/// Loads a program image into the machine.
///
/// Returns the number of words loaded.
///
/// # Errors
///
/// I/O errors from reading the file, or `InvalidData` when the image length
/// is not a multiple of four bytes.
pub fn load_image(machine: &mut MachineState, path: &Path) -> io::Result<u32> {
    let bytes = fs::read(path)?;
    load_words(machine, &bytes)
}

/// Loads a program image already in memory. Same contract as [`load_image`].
pub fn load_words(machine: &mut MachineState, bytes: &[u8]) -> io::Result<u32> {
    if bytes.len() % 4 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("image length {} is not a multiple of 4", bytes.len()),
        ));
    }

    let start = machine.pc;
    let mut pc = start;
    for chunk in bytes.chunks_exact(4) {
        let instr = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        machine.load_instr(pc, instr);
        pc += 1;
    }
    machine.set_memory_size(pc);
    Ok(pc - start)
}
