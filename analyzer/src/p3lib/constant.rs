//! Interpretation of constants written in operands and assignment
//! values.
//!
//! A constant is a number in one of four bases, distinguished by a
//! suffix (`1010b`, `17o`, `7FFFh`, or plain decimal), or a quoted
//! literal (`'A'`, `'Hello'`) which stands for the code of each of
//! its characters.  Numbers are 16-bit words, so a number whose bit
//! 15 is set is negative.
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use base::prelude::*;

use super::rx::LazyRegex;


// Only the hexadecimal suffix may be written in either case.
static BINARY: LazyRegex = LazyRegex::new("^(?<digits>[01]+)b$");
static OCTAL: LazyRegex = LazyRegex::new("^(?<digits>[0-7]+)o$");
static HEXADECIMAL: LazyRegex = LazyRegex::new("^(?<digits>[0-9A-Fa-f]{1,4})[hH]$");
static DECIMAL: LazyRegex = LazyRegex::new("^(?<digits>-?[0-9]+)$");

/// The numeric forms, in the order in which they are tried.
static NUMBER_FORMS: [(&LazyRegex, u32); 4] = [
    (&BINARY, 2),
    (&OCTAL, 8),
    (&HEXADECIMAL, 16),
    (&DECIMAL, 10),
];

fn evaluate_number(token: &str) -> Option<i64> {
    NUMBER_FORMS.iter().find_map(|(rx, radix)| {
        let digits = rx.captures(token)?.name("digits")?;
        // Digit strings too long for an i64 are not constants we can
        // say anything useful about.
        i64::from_str_radix(digits.as_str(), *radix)
            .ok()
            .map(reinterpret_signed)
    })
}

fn evaluate_literal(token: &str) -> Option<Vec<i64>> {
    let body = token.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(body.chars().map(|ch| i64::from(u32::from(ch))).collect())
}

/// Interprets `token` (a single word, or a quoted literal including
/// its quotes) as a sequence of values.  Numbers yield a single
/// value; literals yield one value per character.  Returns `None` when
/// the token is not a constant.
#[must_use]
pub fn evaluate(token: &str) -> Option<Vec<i64>> {
    match evaluate_number(token) {
        Some(n) => Some(vec![n]),
        None => evaluate_literal(token),
    }
}

/// The renderings of a value in each base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendering {
    pub value: i64,
    pub decimal: String,
    /// The unsigned 16-bit form, in (at least) 4 upper-case digits,
    /// with an `h` suffix.
    pub hexadecimal: String,
    pub binary: String,
    /// Only present for values which are Unicode scalar values.
    pub character: Option<char>,
}

impl Rendering {
    #[must_use]
    pub fn new(value: i64) -> Rendering {
        let bits = unsigned_view(value);
        let character = if (0..0x10FFFF).contains(&value) {
            u32::try_from(value).ok().and_then(char::from_u32)
        } else {
            None
        };
        Rendering {
            value,
            decimal: value.to_string(),
            hexadecimal: format!("{bits:04X}h"),
            binary: format!("{bits:b}b"),
            character,
        }
    }
}

impl Display for Rendering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "**Dec**: {} | **Hex**: {}", self.decimal, self.hexadecimal)?;
        if let Some(ch) = self.character {
            write!(f, " | **Char**: {ch}")?;
        }
        write!(f, " | **Bin**: {}", self.binary)
    }
}
