// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer-bubble layout of the exam sheet
//!
//! A template maps each question to the bubble regions of its options. It is
//! validated once when built and is immutable afterwards, so request handlers
//! can share it behind an `Arc`.

use std::collections::BTreeMap;

use super::error::TemplateError;
use super::region::Region;

/// Option label → bubble region, ordered alphabetically
pub type OptionRegions = BTreeMap<char, Region>;

/// Bubble layout of the printed sheet: two questions, options A-D, 40px boxes
const STANDARD_LAYOUT: [(u32, [(char, Region); 4]); 2] = [
    (
        1,
        [
            ('A', Region::new(100, 200, 40, 40)),
            ('B', Region::new(160, 200, 40, 40)),
            ('C', Region::new(220, 200, 40, 40)),
            ('D', Region::new(280, 200, 40, 40)),
        ],
    ),
    (
        2,
        [
            ('A', Region::new(100, 260, 40, 40)),
            ('B', Region::new(160, 260, 40, 40)),
            ('C', Region::new(220, 260, 40, 40)),
            ('D', Region::new(280, 260, 40, 40)),
        ],
    ),
];

/// Validated question → option → region table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTemplate {
    questions: BTreeMap<u32, OptionRegions>,
}

impl AnswerTemplate {
    /// Build a template, rejecting layouts that could not be sampled
    pub fn new(questions: BTreeMap<u32, OptionRegions>) -> Result<Self, TemplateError> {
        if questions.is_empty() {
            return Err(TemplateError::Empty);
        }

        for (&question, options) in &questions {
            if question == 0 {
                return Err(TemplateError::InvalidQuestionId(question));
            }
            if options.is_empty() {
                return Err(TemplateError::QuestionWithoutOptions(question));
            }
            for (&label, region) in options {
                if !label.is_ascii_uppercase() {
                    return Err(TemplateError::InvalidOptionLabel { question, label });
                }
                if region.area() == 0 {
                    return Err(TemplateError::DegenerateRegion {
                        question,
                        label,
                        region: *region,
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    /// The compiled-in layout of the printed answer sheet
    pub fn standard() -> Result<Self, TemplateError> {
        let questions = STANDARD_LAYOUT
            .iter()
            .map(|(question, options)| (*question, options.iter().copied().collect()))
            .collect();
        Self::new(questions)
    }

    /// Questions in ascending identifier order
    pub fn questions(&self) -> impl Iterator<Item = (u32, &OptionRegions)> {
        self.questions.iter().map(|(q, options)| (*q, options))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.questions.keys().copied()
    }

    pub fn options(&self, question: u32) -> Option<&OptionRegions> {
        self.questions.get(&question)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
