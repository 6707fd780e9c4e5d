//! Fixed keyword sets of the assembly language.
//!
//! Mnemonics, register names and directives are all closed sets of
//! upper-case words.  The `keyword_enum` macro generates, for each
//! set, an enumeration together with the table of all its members
//! and the conversions to and from text.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Signals that a word is not a member of a keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword {
    /// What kind of keyword we were looking for ("mnemonic", ...).
    pub kind: &'static str,
    pub text: String,
}

impl Display for UnknownKeyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "'{}' is not a known {}", self.text, self.kind)
    }
}

impl Error for UnknownKeyword {}

/// This macro defines an enumeration of keywords.  Each variant is
/// paired with its spelling in source code.  Parsing ignores ASCII
/// case; `as_str` always yields the canonical (upper-case) spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $Name:ident ($kind:literal) {
            $($Variant:ident => $spelling:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
        $vis enum $Name {
            $($Variant,)*
        }

        impl $Name {
            /// Every member of the set, in the order of definition.
            pub const ALL: &'static [$Name] = &[$($Name::$Variant,)*];

            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($Name::$Variant => $spelling,)*
                }
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $Name {
            type Err = $crate::keyword::UnknownKeyword;

            fn from_str(s: &str) -> Result<$Name, Self::Err> {
                $Name::ALL
                    .iter()
                    .find(|item| item.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| $crate::keyword::UnknownKeyword {
                        kind: $kind,
                        text: s.to_string(),
                    })
            }
        }
    };
}
