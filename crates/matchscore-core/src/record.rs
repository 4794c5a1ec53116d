use serde::{Deserialize, Serialize};

use crate::model::{
    Answer, AnswerOption, AnswerSet, Controls, Question, QuestionId, SideAnswer, MAX_IMPORTANCE,
    MIN_ANSWER, MIN_IMPORTANCE, OPEN_ANSWER,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionRef {
    pub id: QuestionId,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question: Option<QuestionRef>,
    #[serde(default)]
    pub me_answer: Option<f64>,
    #[serde(default)]
    pub me_open_to_all: Option<bool>,
    #[serde(default)]
    pub me_importance: Option<f64>,
    #[serde(default)]
    pub me_multiplier: Option<f64>,
    #[serde(default)]
    pub me_share: Option<bool>,
    #[serde(default)]
    pub looking_for_answer: Option<f64>,
    #[serde(default)]
    pub looking_for_open_to_all: Option<bool>,
    #[serde(default)]
    pub looking_for_importance: Option<f64>,
    #[serde(default)]
    pub looking_for_multiplier: Option<f64>,
    #[serde(default)]
    pub looking_for_share: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerOptionRecord {
    pub value: u8,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub question_number: Option<u32>,
    #[serde(default)]
    pub group_number: Option<u32>,
    #[serde(default)]
    pub options: Vec<AnswerOptionRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ControlsRecord {
    pub adjust: f64,
    pub exponent: f64,
    pub ota: f64,
}

impl From<ControlsRecord> for Controls {
    fn from(record: ControlsRecord) -> Self {
        Self::new(record.adjust, record.exponent, record.ota)
    }
}

// First finite positive value wins, else 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn resolve_importance(importance: Option<f64>, multiplier: Option<f64>) -> u8 {
    let usable = |v: &f64| v.is_finite() && *v > 0.0;
    match importance.filter(usable).or_else(|| multiplier.filter(usable)) {
        Some(level) => level
            .round()
            .clamp(f64::from(MIN_IMPORTANCE), f64::from(MAX_IMPORTANCE)) as u8,
        None => MIN_IMPORTANCE,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn resolve_answer(value: Option<f64>) -> Option<u8> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(f64::from(MIN_ANSWER), f64::from(OPEN_ANSWER)) as u8)
}

impl AnswerRecord {
    pub fn question_id(&self) -> Option<&QuestionId> {
        self.question.as_ref().map(|q| &q.id)
    }

    pub fn normalize(&self) -> Option<Answer> {
        let me = SideAnswer {
            answer: resolve_answer(self.me_answer)?,
            open_to_all: self.me_open_to_all.unwrap_or(false),
            importance: resolve_importance(self.me_importance, self.me_multiplier),
            share: self.me_share.unwrap_or(false),
        };
        let looking_for = SideAnswer {
            answer: resolve_answer(self.looking_for_answer)?,
            open_to_all: self.looking_for_open_to_all.unwrap_or(false),
            importance: resolve_importance(
                self.looking_for_importance,
                self.looking_for_multiplier,
            ),
            share: self.looking_for_share.unwrap_or(false),
        };
        Some(Answer::new(me, looking_for))
    }
}

impl AnswerSet {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AnswerRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            let Some(id) = record.question_id() else {
                continue;
            };
            if let Some(answer) = record.normalize() {
                set.insert(id.clone(), answer);
            }
        }
        set
    }
}

impl Question {
    pub fn from_record(record: &QuestionRecord, position: u32) -> Self {
        Self {
            id: record.id.clone(),
            text: record.text.clone(),
            question_number: record.question_number.unwrap_or(position),
            group_number: record.group_number,
            options: record
                .options
                .iter()
                .map(|o| AnswerOption {
                    value: o.value,
                    label: o.label.clone(),
                })
                .collect(),
        }
    }
}

pub fn questions_from_records(records: &[QuestionRecord]) -> Vec<Question> {
    records
        .iter()
        .zip(1u32..)
        .map(|(record, position)| Question::from_record(record, position))
        .collect()
}
