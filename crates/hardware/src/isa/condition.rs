//! Condition codes for predicated execution.
//!
//! Every instruction carries a condition that is evaluated against the current flags
//! before anything else happens. A failing condition turns the instruction into a no-op
//! that still consumes its cycle. Conditions only read the flags; they never alter them.

use std::fmt;

use crate::core::arch::flags::Flags;

/// A32 condition code.
///
/// The discriminants match the 4-bit `cond` field (bits 31-28) of an A32 encoding.
/// The reserved `0b1111` pattern has no variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Equal (`Z`).
    Eq = 0x0,
    /// Not equal (`!Z`).
    Ne = 0x1,
    /// Carry set / unsigned higher or same (`C`).
    Cs = 0x2,
    /// Carry clear / unsigned lower (`!C`).
    Cc = 0x3,
    /// Minus / negative (`N`).
    Mi = 0x4,
    /// Plus / positive or zero (`!N`).
    Pl = 0x5,
    /// Overflow (`V`).
    Vs = 0x6,
    /// No overflow (`!V`).
    Vc = 0x7,
    /// Unsigned higher (`C && !Z`).
    Hi = 0x8,
    /// Unsigned lower or same (`!C || Z`).
    Ls = 0x9,
    /// Signed greater than or equal (`N == V`).
    Ge = 0xA,
    /// Signed less than (`N != V`).
    Lt = 0xB,
    /// Signed greater than (`!Z && N == V`).
    Gt = 0xC,
    /// Signed less than or equal (`Z || N != V`).
    Le = 0xD,
    /// Always.
    #[default]
    Al = 0xE,
}

impl Condition {
    /// Every condition, in encoding order.
    pub const ALL: [Self; 15] = [
        Self::Eq,
        Self::Ne,
        Self::Cs,
        Self::Cc,
        Self::Mi,
        Self::Pl,
        Self::Vs,
        Self::Vc,
        Self::Hi,
        Self::Ls,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Al,
    ];

    /// Evaluates the condition against a flag snapshot.
    ///
    /// # Arguments
    ///
    /// * `flags` - The flags as they stand before the instruction executes.
    ///
    /// # Returns
    ///
    /// `true` if the instruction should execute.
    pub const fn passes(self, flags: Flags) -> bool {
        let Flags { n, z, c, v } = flags;
        match self {
            Self::Eq => z,
            Self::Ne => !z,
            Self::Cs => c,
            Self::Cc => !c,
            Self::Mi => n,
            Self::Pl => !n,
            Self::Vs => v,
            Self::Vc => !v,
            Self::Hi => c && !z,
            Self::Ls => !c || z,
            Self::Ge => n == v,
            Self::Lt => n != v,
            Self::Gt => !z && n == v,
            Self::Le => z || n != v,
            Self::Al => true,
        }
    }

    /// Maps a 4-bit `cond` field to a condition; `None` for the reserved `0b1111`.
    pub const fn from_field(field: u32) -> Option<Self> {
        Some(match field & 0xF {
            0x0 => Self::Eq,
            0x1 => Self::Ne,
            0x2 => Self::Cs,
            0x3 => Self::Cc,
            0x4 => Self::Mi,
            0x5 => Self::Pl,
            0x6 => Self::Vs,
            0x7 => Self::Vc,
            0x8 => Self::Hi,
            0x9 => Self::Ls,
            0xA => Self::Ge,
            0xB => Self::Lt,
            0xC => Self::Gt,
            0xD => Self::Le,
            0xE => Self::Al,
            _ => return None,
        })
    }

    /// Parses a two-letter mnemonic suffix (case-insensitive), including the
    /// `HS`/`LO` aliases for `CS`/`CC`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let cond = match suffix.to_ascii_uppercase().as_str() {
            "EQ" => Self::Eq,
            "NE" => Self::Ne,
            "CS" | "HS" => Self::Cs,
            "CC" | "LO" => Self::Cc,
            "MI" => Self::Mi,
            "PL" => Self::Pl,
            "VS" => Self::Vs,
            "VC" => Self::Vc,
            "HI" => Self::Hi,
            "LS" => Self::Ls,
            "GE" => Self::Ge,
            "LT" => Self::Lt,
            "GT" => Self::Gt,
            "LE" => Self::Le,
            "AL" => Self::Al,
            _ => return None,
        };
        Some(cond)
    }

    /// Returns the lower-case suffix used in disassembly; empty for `AL`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Cs => "cs",
            Self::Cc => "cc",
            Self::Mi => "mi",
            Self::Pl => "pl",
            Self::Vs => "vs",
            Self::Vc => "vc",
            Self::Hi => "hi",
            Self::Ls => "ls",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Al => "",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Al => f.write_str("al"),
            other => f.write_str(other.suffix()),
        }
    }
}
