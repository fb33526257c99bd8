//! Conformance fixture runner
//!
//! Loads YAML fixtures and runs them against the rure adapter.

use rure::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use crate::parse_flag_names;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pattern: String,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Raw options document; `None` runs both capture modes.
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    /// Expected construction failure: `syntax`, `size_limit`, `engine`, `invalid_options`.
    #[serde(default)]
    pub expect_error: Option<String>,
    /// Number of diagnostics construction must raise.
    #[serde(default)]
    pub expect_diagnostics: Option<usize>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Which operation a case exercises
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    IsMatch,
    Search,
    Match,
    #[default]
    Findall,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub pos: usize,
    #[serde(default)]
    pub endpos: Option<usize>,
    #[serde(default)]
    pub op: Operation,
    /// Expected matches, in order. `search`/`match` expect at most one.
    #[serde(default)]
    pub expect: Vec<ExpectedMatch>,
    /// Expected `is_match` result.
    #[serde(default)]
    pub matches: Option<bool>,
}

/// One expected match
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedMatch {
    pub span: (usize, usize),
    #[serde(default)]
    pub groups: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub groupdict: Option<HashMap<String, Option<String>>>,
    /// Absent: not checked. `~`: must be `None`.
    #[serde(default, deserialize_with = "present")]
    pub lastindex: Option<Option<usize>>,
    /// Absent: not checked. `~`: must be `None`.
    #[serde(default, deserialize_with = "present")]
    pub lastgroup: Option<Option<String>>,
}

/// Marks a key as present even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Observed results
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub submatches: bool,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

fn observe(m: &Match<'_, '_>, want: &ExpectedMatch) -> Result<ExpectedMatch, RegexError> {
    let whole = m.whole();
    let owned = |g: Option<std::borrow::Cow<'_, str>>| g.map(std::borrow::Cow::into_owned);

    // Only read what the fixture pins down, so lazy matches keep their
    // "no extra call" behavior where a fixture does not ask for groups.
    let groups = match want.groups {
        Some(_) => Some(m.groups(None)?.into_iter().map(owned).collect()),
        None => None,
    };
    let groupdict = match want.groupdict {
        Some(_) => Some(
            m.groupdict(None)?
                .into_iter()
                .map(|(k, v)| (k.to_string(), owned(v)))
                .collect(),
        ),
        None => None,
    };
    let lastindex = match want.lastindex {
        Some(_) => Some(m.lastindex()?),
        None => None,
    };
    let lastgroup = match want.lastgroup {
        Some(_) => Some(m.lastgroup()?.map(str::to_string)),
        None => None,
    };

    Ok(ExpectedMatch {
        span: (whole.start, whole.end),
        groups,
        groupdict,
        lastindex,
        lastgroup,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    fn option_sets(&self) -> Result<Vec<Options>, RegexError> {
        match &self.options {
            Some(value) => Ok(vec![Options::from_value(value.clone())?]),
            None => Ok(vec![Options::new(), Options::new().submatches(true)]),
        }
    }

    /// Compile the fixture's pattern once per option set.
    pub fn compile(&self) -> Result<Vec<Regex>, RegexError> {
        let flags = parse_flag_names(&self.flags)
            .map_err(|reason| RegexError::InvalidOptions { reason })?;
        self.option_sets()?
            .into_iter()
            .map(|options| Regex::with_options(self.pattern.as_str(), flags, options))
            .collect()
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        let compiled = self.compile();

        if let Some(kind) = &self.expect_error {
            let actual = match &compiled {
                Ok(_) => "ok".to_string(),
                Err(e) => error_kind(e).to_string(),
            };
            return vec![CaseResult {
                case_name: "<construction>".into(),
                submatches: false,
                passed: &actual == kind,
                expected: kind.clone(),
                actual,
            }];
        }

        let regexes = match compiled {
            Ok(r) => r,
            Err(e) => {
                return vec![CaseResult {
                    case_name: "<construction>".into(),
                    submatches: false,
                    passed: false,
                    expected: "ok".into(),
                    actual: e.to_string(),
                }]
            }
        };

        let mut results = Vec::new();
        for re in &regexes {
            if let Some(n) = self.expect_diagnostics {
                results.push(CaseResult {
                    case_name: "<diagnostics>".into(),
                    submatches: re.options().submatches,
                    passed: re.diagnostics().len() == n,
                    expected: n.to_string(),
                    actual: format!("{:?}", re.diagnostics()),
                });
            }
            for case in &self.cases {
                results.push(case.run(re));
            }
        }
        results
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' (submatches={}) failed: expected {}, got {}",
                self.name, result.case_name, result.submatches, result.expected, result.actual
            );
        }
    }
}

impl TestCase {
    fn run(&self, re: &Regex) -> CaseResult {
        let (passed, expected, actual) = match self.observe(re) {
            Ok(outcome) => outcome,
            Err(e) => (false, format!("{:?}", self.expect), format!("error: {e}")),
        };
        CaseResult {
            case_name: self.name.clone(),
            submatches: re.options().submatches,
            passed,
            expected,
            actual,
        }
    }

    fn observe(&self, re: &Regex) -> Result<(bool, String, String), RegexError> {
        let text = self.text.as_str();
        if self.op == Operation::IsMatch {
            let actual = Some(re.is_match(text, self.pos, self.endpos)?);
            return Ok((
                actual == self.matches,
                format!("{:?}", self.matches),
                format!("{actual:?}"),
            ));
        }

        let found = match self.op {
            Operation::Search => re.search(text, self.pos, self.endpos)?.into_iter().collect(),
            Operation::Match => re.match_at(text, self.pos, self.endpos)?.into_iter().collect(),
            Operation::Findall | Operation::IsMatch => re.findall(text, self.pos, self.endpos)?,
        };

        let unpinned = ExpectedMatch {
            span: (0, 0),
            groups: None,
            groupdict: None,
            lastindex: None,
            lastgroup: None,
        };
        let mut actual = Vec::with_capacity(found.len());
        for (i, m) in found.iter().enumerate() {
            actual.push(observe(m, self.expect.get(i).unwrap_or(&unpinned))?);
        }
        Ok((
            actual == self.expect,
            format!("{:?}", self.expect),
            format!("{actual:?}"),
        ))
    }
}

/// Fixture spelling of an error kind.
#[must_use]
pub fn error_kind(e: &RegexError) -> &'static str {
    match e {
        RegexError::Syntax { .. } => "syntax",
        RegexError::SizeLimitExceeded { .. } => "size_limit",
        RegexError::Engine { .. } => "engine",
        RegexError::Unsupported { .. } => "unsupported",
        RegexError::Index { .. } => "index",
        RegexError::InvalidOptions { .. } => "invalid_options",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_fixture() {
        let f = Fixture::from_yaml(
            r#"
name: words
pattern: '(?P<word>\w+)'
cases:
  - name: two words
    text: "hi there"
    expect:
      - span: [0, 2]
        groupdict: { word: "hi" }
      - span: [3, 8]
        groupdict: { word: "there" }
"#,
        )
        .unwrap();
        let results = f.run();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn failing_fixture_is_reported() {
        let f = Fixture::from_yaml(
            r#"
name: wrong
pattern: 'a'
cases:
  - name: wrong span
    text: "ba"
    op: search
    expect:
      - span: [0, 1]
"#,
        )
        .unwrap();
        assert!(f.run().iter().all(|r| !r.passed));
    }

    #[test]
    fn explicit_null_is_checked() {
        let f = Fixture::from_yaml(
            r#"
name: no groups
pattern: 'a'
cases:
  - name: lastindex is none
    text: "a"
    expect:
      - span: [0, 1]
        lastindex: ~
        lastgroup: ~
"#,
        )
        .unwrap();
        assert_eq!(f.cases[0].expect[0].lastindex, Some(None));
        assert_eq!(f.cases[0].expect[0].lastgroup, Some(None));
        assert!(f.run().iter().all(|r| r.passed));

        let f = Fixture::from_yaml(
            r#"
name: one group
pattern: '(a)'
cases:
  - name: lastindex is not none
    text: "a"
    expect:
      - span: [0, 1]
        lastindex: ~
"#,
        )
        .unwrap();
        assert!(f.run().iter().all(|r| !r.passed));
    }

    #[test]
    fn absent_key_is_not_checked() {
        let f = Fixture::from_yaml(
            "name: g\npattern: '(a)'\ncases:\n  - name: c\n    text: a\n    expect:\n      - span: [0, 1]\n",
        )
        .unwrap();
        assert_eq!(f.cases[0].expect[0].lastindex, None);
        assert!(f.run().iter().all(|r| r.passed));
    }

    #[test]
    fn error_fixture() {
        let f = Fixture::from_yaml("name: bad\npattern: '('\nexpect_error: syntax\n").unwrap();
        let results = f.run();
        assert!(results[0].passed, "{results:?}");
    }

    #[test]
    fn multi_document() {
        let yaml = "name: a\npattern: a\n---\nname: b\npattern: b\n";
        assert_eq!(Fixture::from_yaml_multi(yaml).unwrap().len(), 2);
    }
}
