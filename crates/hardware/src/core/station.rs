//! Reservation stations and the station half of the common data bus.
//!
//! Each execution unit owns one reservation station. A station holds the
//! captured instruction word and two operands, each of which is either an
//! already-captured value or a tag naming the unit that will produce it.
//! The tag-to-value transition happens only through [`Stations::broadcast`].

use crate::common::constants::NUM_UNITS;

/// The six execution units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ExecUnit {
    /// First load unit.
    #[default]
    Load1,
    /// Second load unit.
    Load2,
    /// First store unit (commit-side store phase only).
    Store1,
    /// Second store unit (commit-side store phase only).
    Store2,
    /// First integer unit.
    Int1,
    /// Second integer unit.
    Int2,
}

impl ExecUnit {
    /// All units, in station-index order.
    pub const ALL: [ExecUnit; NUM_UNITS] = [
        ExecUnit::Load1,
        ExecUnit::Load2,
        ExecUnit::Store1,
        ExecUnit::Store2,
        ExecUnit::Int1,
        ExecUnit::Int2,
    ];

    /// Issue pool for loads.
    pub const LOAD_POOL: [ExecUnit; 2] = [ExecUnit::Load1, ExecUnit::Load2];

    /// Pool used by the commit-side store phase.
    pub const STORE_POOL: [ExecUnit; 2] = [ExecUnit::Store1, ExecUnit::Store2];

    /// Issue pool for everything that is not a load.
    pub const INT_POOL: [ExecUnit; 2] = [ExecUnit::Int1, ExecUnit::Int2];

    /// Dense station index in `0..NUM_UNITS`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit name for traces and external views.
    pub fn name(self) -> &'static str {
        match self {
            ExecUnit::Load1 => "LOAD1",
            ExecUnit::Load2 => "LOAD2",
            ExecUnit::Store1 => "STORE1",
            ExecUnit::Store2 => "STORE2",
            ExecUnit::Int1 => "INT1",
            ExecUnit::Int2 => "INT2",
        }
    }

    /// True for the two store units.
    #[inline]
    pub fn is_store(self) -> bool {
        matches!(self, ExecUnit::Store1 | ExecUnit::Store2)
    }
}

/// A reservation-station operand: either a captured value or the tag of the
/// unit that will broadcast it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The value is available.
    Value(u32),
    /// Waiting on a broadcast from the named unit.
    Tag(ExecUnit),
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Value(0)
    }
}

impl Operand {
    /// True once the operand carries a value.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, Operand::Value(_))
    }

    /// The captured value, if any.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            Operand::Value(v) => Some(v),
            Operand::Tag(_) => None,
        }
    }

    /// The pending producer tag, if any.
    #[inline]
    pub fn tag(self) -> Option<ExecUnit> {
        match self {
            Operand::Value(_) => None,
            Operand::Tag(unit) => Some(unit),
        }
    }
}

/// A single reservation station.
#[derive(Clone, Copy, Debug, Default)]
pub struct Station {
    /// Whether the station is occupied.
    pub busy: bool,
    /// Captured instruction word.
    pub instr: u32,
    /// First operand (base address for memory ops, left ALU input).
    pub vj: Operand,
    /// Second operand (store data, right ALU input).
    pub vk: Operand,
    /// Execute cycles remaining.
    pub ex_time_left: u32,
    /// ROB index of the owning in-flight instruction.
    pub rob_idx: usize,
}

/// The full set of reservation stations, indexed by execution unit.
#[derive(Clone, Debug, Default)]
pub struct Stations {
    units: [Station; NUM_UNITS],
}

impl Stations {
    /// Creates the station set with every station free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the station owned by `unit`.
    #[inline]
    pub fn get(&self, unit: ExecUnit) -> &Station {
        &self.units[unit.index()]
    }

    /// Returns the station owned by `unit` mutably.
    #[inline]
    pub fn get_mut(&mut self, unit: ExecUnit) -> &mut Station {
        &mut self.units[unit.index()]
    }

    /// Scans a pool and returns the first free unit, if any.
    pub fn first_free(&self, pool: &[ExecUnit]) -> Option<ExecUnit> {
        pool.iter().copied().find(|&unit| !self.get(unit).busy)
    }

    /// Frees a station back to its default state.
    pub fn clear(&mut self, unit: ExecUnit) {
        self.units[unit.index()] = Station::default();
    }

    /// Frees every station. Used by the misprediction squash.
    pub fn reset(&mut self) {
        self.units = [Station::default(); NUM_UNITS];
    }

    /// Station half of the common data bus: every busy station waiting on
    /// `unit` captures `value` into the matching operand.
    pub fn broadcast(&mut self, unit: ExecUnit, value: u32) {
        for station in &mut self.units {
            if !station.busy {
                continue;
            }
            if station.vj == Operand::Tag(unit) {
                station.vj = Operand::Value(value);
            }
            if station.vk == Operand::Tag(unit) {
                station.vk = Operand::Value(value);
            }
        }
    }

    /// Iterates the stations in unit order.
    pub fn iter(&self) -> impl Iterator<Item = (ExecUnit, &Station)> + '_ {
        ExecUnit::ALL.iter().map(move |&unit| (unit, self.get(unit)))
    }
}
