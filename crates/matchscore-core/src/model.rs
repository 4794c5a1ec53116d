use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::importance::is_usable_exponent;

pub const OPEN_ANSWER: u8 = 6;
pub const MIN_ANSWER: u8 = 1;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 5;

pub const DEFAULT_ADJUST: f64 = 5.0;
pub const DEFAULT_EXPONENT: f64 = 2.0;
pub const DEFAULT_OTA: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawQuestionId", into = "String")]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<QuestionId> for String {
    fn from(value: QuestionId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionId {
    Int(i64),
    Text(String),
}

impl From<RawQuestionId> for QuestionId {
    fn from(raw: RawQuestionId) -> Self {
        match raw {
            RawQuestionId::Int(v) => Self::from(v),
            RawQuestionId::Text(v) => Self(v.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub question_number: u32,
    pub group_number: Option<u32>,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, question_number: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_number,
            group_number: None,
            options: Vec::new(),
        }
    }

    pub fn with_group(mut self, group_number: u32) -> Self {
        self.group_number = Some(group_number);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SideAnswer {
    pub answer: u8,
    pub open_to_all: bool,
    pub importance: u8,
    pub share: bool,
}

impl SideAnswer {
    pub fn new(answer: u8, importance: u8) -> Self {
        Self {
            answer: answer.clamp(MIN_ANSWER, OPEN_ANSWER),
            open_to_all: false,
            importance: importance.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE),
            share: false,
        }
    }

    pub fn open(mut self) -> Self {
        self.open_to_all = true;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open_to_all || self.answer == OPEN_ANSWER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub me: SideAnswer,
    pub looking_for: SideAnswer,
}

impl Answer {
    pub fn new(me: SideAnswer, looking_for: SideAnswer) -> Self {
        Self { me, looking_for }
    }
}

// First-seen order; a repeated question replaces the earlier answer in place.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    order: Vec<QuestionId>,
    by_question: HashMap<QuestionId, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question: impl Into<QuestionId>, answer: Answer) {
        let question = question.into();
        if self.by_question.insert(question.clone(), answer).is_none() {
            self.order.push(question);
        }
    }

    pub fn with(mut self, question: impl Into<QuestionId>, answer: Answer) -> Self {
        self.insert(question, answer);
        self
    }

    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.by_question.get(question)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.order
            .iter()
            .filter_map(|id| self.by_question.get(id).map(|answer| (id, answer)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub adjust: f64,
    pub exponent: f64,
    pub ota: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            adjust: DEFAULT_ADJUST,
            exponent: DEFAULT_EXPONENT,
            ota: DEFAULT_OTA,
        }
    }
}

impl Controls {
    pub fn new(adjust: f64, exponent: f64, ota: f64) -> Self {
        Self {
            adjust,
            exponent,
            ota,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.adjust.is_finite() || !self.exponent.is_finite() || !self.ota.is_finite() {
            return Err("controls contain a non-finite value");
        }
        if self.exponent < 0.0 {
            return Err("exponent must not be negative");
        }
        if !is_usable_exponent(self.exponent) {
            return Err("exponent overflows the essential importance weight");
        }
        if self.adjust <= 0.0 {
            return Err("adjust must be positive");
        }
        if !(0.0..=1.0).contains(&self.ota) {
            return Err("ota must be within [0, 1]");
        }
        Ok(())
    }
}
