//! rure-test: conformance fixtures for the rure adapter
//!
//! Fixtures are YAML documents describing a pattern, its flags and options,
//! and the matches expected for a list of inputs. Every fixture without
//! explicit options runs twice, once with lazy captures and once with
//! `submatches`, since both paths must agree.
//!
//! # Example
//!
//! ```
//! use rure_test::fixture::Fixture;
//!
//! let fixture = Fixture::from_yaml(r#"
//! name: digits
//! pattern: '\d+'
//! cases:
//!   - name: two runs
//!     text: "a1 b22"
//!     expect:
//!       - span: [1, 2]
//!       - span: [4, 6]
//! "#).unwrap();
//! fixture.run_and_assert();
//! ```

pub mod fixture;

use rure::{Flag, Flags};

/// Parse Python flag names (`IGNORECASE`, `MULTILINE`, ...) into a flag word.
///
/// # Errors
///
/// Returns the first name that is not a recognized flag.
pub fn parse_flag_names<S: AsRef<str>>(names: &[S]) -> Result<Flags, String> {
    names.iter().try_fold(Flags::empty(), |acc, name| {
        let name = name.as_ref();
        Flag::ALL
            .iter()
            .find(|f| f.name() == name)
            .map(|f| acc | f.bit())
            .ok_or_else(|| format!("unknown flag \"{name}\""))
    })
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::fixture::{CaseResult, Fixture};
    pub use crate::parse_flag_names;
    pub use rure::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_names() {
        assert_eq!(
            parse_flag_names(&["IGNORECASE", "DOTALL"]),
            Ok(Flags::IGNORECASE | Flags::DOTALL)
        );
        assert_eq!(parse_flag_names::<&str>(&[]), Ok(Flags::empty()));
        assert!(parse_flag_names(&["ASCII"]).is_err());
    }
}
