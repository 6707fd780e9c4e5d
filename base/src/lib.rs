//! The `base` crate defines the P3-related things which are useful
//! to every tool which reads P3 assembly source: the instruction
//! mnemonics, the register names, the assignment directives and the
//! arithmetic of the 16-bit machine word.  The idea is that a source
//! analyser (or an assembler, or a simulator) depends on this crate
//! without needing to depend on any of the others.

#[macro_use]
mod keyword;

pub mod directive;
pub mod mnemonic;
pub mod prelude;
pub mod register;
pub mod word;

pub use keyword::UnknownKeyword;
