//! Rolls an inspection's answers up into bucket counts and an overall verdict.
//!
//! Every item the template defines is counted exactly once, whether or not the
//! inspection still holds a response for it; a missing response counts as
//! unanswered.

use crate::model::inspection::Inspection;
use crate::model::response::ResultCode;
use crate::model::template::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Pass,
    Fail,
    InProgress,
}

impl OverallStatus {
    pub fn label(self) -> &'static str {
        match self {
            OverallStatus::Pass => "PASS",
            OverallStatus::Fail => "FAIL",
            OverallStatus::InProgress => "IN PROGRESS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub overall: OverallStatus,
    pub pass: usize,
    pub fail: usize,
    pub na: usize,
    pub empty: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.pass + self.fail + self.na + self.empty
    }
}

/// Verdict from bucket counts, first match wins:
/// any FAIL is a FAIL; otherwise at least one PASS with nothing unanswered is
/// a PASS; everything else is still in progress.
///
/// N/A never blocks a PASS, but an inspection answered N/A throughout has no
/// PASS and stays in progress.
pub fn overall_status(pass: usize, fail: usize, empty: usize) -> OverallStatus {
    if fail > 0 {
        OverallStatus::Fail
    } else if pass > 0 && empty == 0 {
        OverallStatus::Pass
    } else {
        OverallStatus::InProgress
    }
}

pub fn summarize(inspection: &Inspection, template: &Template) -> Summary {
    let (mut pass, mut fail, mut na, mut empty) = (0, 0, 0, 0);
    for item in template.items() {
        match inspection.resolve(&item.id).code() {
            ResultCode::Pass => pass += 1,
            ResultCode::Fail => fail += 1,
            ResultCode::Na => na += 1,
            ResultCode::Empty => empty += 1,
        }
    }

    Summary {
        overall: overall_status(pass, fail, empty),
        pass,
        fail,
        na,
        empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inspection::fixtures::{answer, inspection_for};
    use crate::model::template::fixtures::two_item_template;
    use crate::model::template::{Item, Section};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn pass_with_one_unanswered_is_in_progress() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "PASS");

        assert_eq!(
            summarize(&inspection, &template),
            Summary {
                overall: OverallStatus::InProgress,
                pass: 1,
                fail: 0,
                na: 0,
                empty: 1,
            }
        );
    }

    #[test]
    fn pass_and_na_is_pass() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "PASS");
        answer(&mut inspection, "item2", "NA");

        let summary = summarize(&inspection, &template);
        assert_eq!((summary.pass, summary.na, summary.empty), (1, 1, 0));
        assert_eq!(summary.overall, OverallStatus::Pass);
    }

    #[test]
    fn any_fail_is_fail() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "FAIL");
        answer(&mut inspection, "item2", "PASS");

        assert_eq!(summarize(&inspection, &template).overall, OverallStatus::Fail);
    }

    #[test]
    fn all_na_stays_in_progress() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "NA");
        answer(&mut inspection, "item2", "NA");

        let summary = summarize(&inspection, &template);
        assert_eq!(summary.na, 2);
        assert_eq!(summary.overall, OverallStatus::InProgress);
    }

    #[test]
    fn template_drift_counts_missing_items_as_empty() {
        let mut template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "PASS");
        answer(&mut inspection, "item2", "PASS");
        template.sections[0].items.push(Item {
            id: "item3".to_string(),
            text: "Added later".to_string(),
        });

        let summary = summarize(&inspection, &template);
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.overall, OverallStatus::InProgress);
    }

    #[test]
    fn unrecognized_and_lowercase_results_count_as_empty() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "pass");
        answer(&mut inspection, "item2", "maybe");

        let summary = summarize(&inspection, &template);
        assert_eq!(summary.empty, 2);
        assert_eq!(summary.pass, 0);
    }

    fn template_with(count: usize) -> Template {
        Template {
            brand: None,
            sections: vec![Section {
                id: "s".to_string(),
                title: "S".to_string(),
                items: (0..count)
                    .map(|i| Item {
                        id: format!("i{i}"),
                        text: format!("Item {i}"),
                    })
                    .collect(),
            }],
        }
    }

    /// `None` drops the response entirely, simulating template drift.
    fn answer_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![
            Just(Some("PASS")),
            Just(Some("FAIL")),
            Just(Some("NA")),
            Just(Some("")),
            Just(Some("pass")),
            Just(Some("unknown")),
            Just(None),
        ]
    }

    fn build(answers: &[Option<&'static str>]) -> (Template, Inspection) {
        let template = template_with(answers.len());
        let mut inspection = inspection_for(&template);
        for (i, a) in answers.iter().enumerate() {
            let id = format!("i{i}");
            match a {
                Some(result) => answer(&mut inspection, &id, result),
                None => {
                    inspection.responses.remove(&id);
                }
            }
        }
        (template, inspection)
    }

    proptest! {
        #[test]
        fn buckets_cover_every_template_item(answers in prop::collection::vec(answer_strategy(), 0..24)) {
            let (template, inspection) = build(&answers);
            let summary = summarize(&inspection, &template);
            prop_assert_eq!(summary.total(), template.item_count());
        }

        #[test]
        fn any_fail_forces_fail(answers in prop::collection::vec(answer_strategy(), 0..24)) {
            let mut answers = answers;
            answers.push(Some("FAIL"));
            let (template, inspection) = build(&answers);
            prop_assert_eq!(summarize(&inspection, &template).overall, OverallStatus::Fail);
        }

        #[test]
        fn pass_requires_no_fail_and_no_empty(answers in prop::collection::vec(
            prop_oneof![Just(Some("PASS")), Just(Some("NA"))], 1..24)
        ) {
            let mut answers = answers;
            answers.push(Some("PASS"));
            let (template, inspection) = build(&answers);
            prop_assert_eq!(summarize(&inspection, &template).overall, OverallStatus::Pass);
        }

        #[test]
        fn all_na_never_passes(count in 1usize..24) {
            let answers = vec![Some("NA"); count];
            let (template, inspection) = build(&answers);
            let summary = summarize(&inspection, &template);
            prop_assert_eq!(summary.na, count);
            prop_assert_eq!(summary.overall, OverallStatus::InProgress);
        }
    }
}
