// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Picks the marked option of every question

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::binarize::BinaryMask;
use super::error::OmrError;
use super::sampler::density;
use super::template::AnswerTemplate;

/// Densities below this mean the question was left blank
pub const MIN_FILL_DENSITY: f64 = 0.15;

/// Question id → chosen option label, `None` when nothing was marked.
///
/// Serializes as `{"1": "A", "2": null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<u32, Option<char>>);

impl AnswerSheet {
    /// `None` if the question is unknown, `Some(None)` if it was left blank
    pub fn get(&self, question: u32) -> Option<Option<char>> {
        self.0.get(&question).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<char>)> + '_ {
        self.0.iter().map(|(q, answer)| (*q, *answer))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    /// Number of questions with a detected mark
    pub fn answered(&self) -> usize {
        self.0.values().filter(|answer| answer.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, Option<char>)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (u32, Option<char>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Read every question of `template` from a binarized sheet.
///
/// Options are scanned alphabetically and the running best is only replaced
/// by a strictly denser region, so exact ties go to the earliest label.
pub fn resolve(mask: &BinaryMask, template: &AnswerTemplate) -> Result<AnswerSheet, OmrError> {
    let mut answers = BTreeMap::new();

    for (question, options) in template.questions() {
        let mut best: Option<(char, f64)> = None;

        for (&label, region) in options {
            let fill = density(mask, region)?;
            match best {
                Some((_, top)) if fill <= top => {}
                _ => best = Some((label, fill)),
            }
        }

        let answer = best
            .filter(|&(_, fill)| fill >= MIN_FILL_DENSITY)
            .map(|(label, _)| label);

        debug!(
            "Question {}: best {:?}, answer {:?}",
            question, best, answer
        );
        answers.insert(question, answer);
    }

    Ok(AnswerSheet(answers))
}
