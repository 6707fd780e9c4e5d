//! The prelude exports the vocabulary of the P3 assembly language.
//! Providing this prelude is the main purpose of the base crate.
pub use super::directive::Directive;
pub use super::keyword::UnknownKeyword;
pub use super::mnemonic::Mnemonic;
pub use super::register::Register;
pub use super::word::{reinterpret_signed, unsigned_view, SIGN_BIT, WORD_MODULUS};
