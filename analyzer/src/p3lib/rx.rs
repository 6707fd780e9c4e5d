use std::{ops::Deref, sync::OnceLock};

use regex::Regex;

/// Where the text of a [`LazyRegex`] comes from.
enum Pattern {
    Fixed(&'static str),
    /// Some patterns are derived from keyword tables in the base
    /// crate, so they can only be built at run time.
    Built(fn() -> String),
}

/// A regular expression which is compiled the first time it is used
/// and then shared (read-only) by every thread.
pub(crate) struct LazyRegex {
    once: OnceLock<Regex>,
    pattern: Pattern,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        LazyRegex {
            once: OnceLock::new(),
            pattern: Pattern::Fixed(pattern),
        }
    }

    pub(crate) const fn built_by(builder: fn() -> String) -> Self {
        LazyRegex {
            once: OnceLock::new(),
            pattern: Pattern::Built(builder),
        }
    }
}

impl Deref for LazyRegex {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        self.once.get_or_init(|| {
            let pattern: String = match &self.pattern {
                Pattern::Fixed(s) => (*s).to_string(),
                Pattern::Built(builder) => builder(),
            };
            match Regex::new(&pattern) {
                Ok(r) => r,
                Err(e) => {
                    panic!("'{pattern}' is not a valid regular expression: {e}");
                }
            }
        })
    }
}

#[test]
fn test_built_pattern_is_compiled_once() {
    static WORDS: LazyRegex = LazyRegex::built_by(|| ["AB", "A"].join("|"));
    assert_eq!(WORDS.find("xAB").map(|m| m.range()), Some(1..3));
    let first: *const Regex = &*WORDS;
    let second: *const Regex = &*WORDS;
    assert_eq!(first, second);
}
