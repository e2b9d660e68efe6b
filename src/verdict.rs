//! TAP-style pass/fail lines.
//!
//! A test case passes when the table under test and the expected table hold
//! the same set of rows: their union must be no larger than either of them.

use crate::classifier::quote;
use crate::table::EXPECTED_TABLE;

/// Which diagnostics accompany each verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Print the rows of the table under test.
    pub show_results: bool,
    /// Print the rows present on only one side.
    pub show_diff: bool,
}

/// The verdict of one test case.
#[derive(Debug, Clone, Copy)]
pub struct Verdict<'a> {
    pub number: usize,
    pub test_name: &'a str,
    pub case_name: &'a str,
}

impl Verdict<'_> {
    fn label(&self, outcome: &str) -> String {
        quote(&format!(
            "{} {} - {}: {}",
            outcome, self.number, self.test_name, self.case_name
        ))
    }

    /// The statement printing `ok` or `not ok`.
    pub fn assertion(&self) -> String {
        let case = self.case_name;
        format!(
            "
SELECT CASE WHEN
  (SELECT COUNT(*) FROM (
    SELECT * FROM {expected}
    UNION
    SELECT * FROM {case}
  ) AS u1) = (SELECT COUNT(*) FROM {expected}) AND
  (SELECT COUNT(*) FROM (
    SELECT * FROM {expected}
    UNION
    SELECT * FROM {case}
  ) AS u2) = (SELECT COUNT(*) FROM {case})
THEN {ok} ELSE
{not_ok} END;
",
            expected = EXPECTED_TABLE,
            case = case,
            ok = self.label("ok"),
            not_ok = self.label("not ok"),
        )
    }

    /// Statements following the assertion, as requested.
    pub fn diagnostics(&self, diagnostics: Diagnostics) -> Vec<String> {
        let case = self.case_name;
        let mut statements = Vec::new();
        if diagnostics.show_results {
            statements.push(format!("SELECT * FROM {};", case));
        }
        if diagnostics.show_diff {
            statements.push(format!(
                "SELECT {};",
                quote(&format!("# Rows of {} missing from {}", EXPECTED_TABLE, case))
            ));
            statements.push(format!(
                "SELECT * FROM {} EXCEPT SELECT * FROM {};",
                EXPECTED_TABLE, case
            ));
            statements.push(format!(
                "SELECT {};",
                quote(&format!("# Unexpected rows in {}", case))
            ));
            statements.push(format!(
                "SELECT * FROM {} EXCEPT SELECT * FROM {};",
                case, EXPECTED_TABLE
            ));
        }
        statements
    }
}
