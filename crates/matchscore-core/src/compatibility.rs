use std::collections::HashSet;

use serde::Serialize;

use crate::direction::{finite_or_zero, score_direction, DirectionInput, DirectionScore};
use crate::model::{Answer, AnswerSet, Controls, Question, QuestionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutualQuestion<'a> {
    pub id: &'a QuestionId,
    pub text: &'a str,
    pub question_number: u32,
    pub group_number: Option<u32>,
    pub answer_a: &'a Answer,
    pub answer_b: &'a Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionScore {
    pub question: QuestionId,
    pub text: String,
    pub question_number: u32,
    pub group_number: Option<u32>,
    #[serde(flatten)]
    pub score: DirectionScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityReport {
    pub per_question_a: Vec<QuestionScore>,
    pub per_question_b: Vec<QuestionScore>,
    pub pct_a: f64,
    pub pct_b: f64,
    pub overall_pct: f64,
}

impl CompatibilityReport {
    pub fn empty() -> Self {
        Self {
            per_question_a: Vec::new(),
            per_question_b: Vec::new(),
            pct_a: 0.0,
            pct_b: 0.0,
            overall_pct: 0.0,
        }
    }

    pub fn mutual_count(&self) -> usize {
        self.per_question_a.len()
    }

    pub fn display_rows(&self) -> Vec<(&QuestionScore, &QuestionScore)> {
        let mut rows: Vec<_> = self
            .per_question_a
            .iter()
            .zip(self.per_question_b.iter())
            .collect();
        rows.sort_by_key(|(a, _)| (a.question_number, a.group_number));
        rows
    }
}

// Catalog order first, then questions missing from the catalog in A's order.
pub fn mutual_questions<'a>(
    user_a: &'a AnswerSet,
    user_b: &'a AnswerSet,
    questions: &'a [Question],
) -> Vec<MutualQuestion<'a>> {
    let mut seen: HashSet<&QuestionId> = HashSet::new();
    let mut mutual = Vec::new();

    for question in questions {
        if !seen.insert(&question.id) {
            continue;
        }
        if let (Some(answer_a), Some(answer_b)) =
            (user_a.get(&question.id), user_b.get(&question.id))
        {
            mutual.push(MutualQuestion {
                id: &question.id,
                text: &question.text,
                question_number: question.question_number,
                group_number: question.group_number,
                answer_a,
                answer_b,
            });
        }
    }

    for (id, answer_a) in user_a.iter() {
        if seen.contains(id) {
            continue;
        }
        if let Some(answer_b) = user_b.get(id) {
            let position = u32::try_from(mutual.len() + 1).unwrap_or(u32::MAX);
            mutual.push(MutualQuestion {
                id,
                text: "",
                question_number: position,
                group_number: None,
                answer_a,
                answer_b,
            });
        }
    }

    mutual
}

pub fn calculate_compatibility(
    user_a: &AnswerSet,
    user_b: &AnswerSet,
    questions: &[Question],
    controls: &Controls,
) -> CompatibilityReport {
    let mutual = mutual_questions(user_a, user_b, questions);
    if mutual.is_empty() {
        return CompatibilityReport::empty();
    }

    let mut per_question_a = Vec::with_capacity(mutual.len());
    let mut per_question_b = Vec::with_capacity(mutual.len());
    let (mut total_score_a, mut total_max_a) = (0.0_f64, 0.0_f64);
    let (mut total_score_b, mut total_max_b) = (0.0_f64, 0.0_f64);

    for q in &mutual {
        let a = score_direction(&DirectionInput::between(q.answer_a, q.answer_b), controls);
        let b = score_direction(&DirectionInput::between(q.answer_b, q.answer_a), controls);

        total_score_a += a.score;
        total_max_a += a.max;
        total_score_b += b.score;
        total_max_b += b.max;

        per_question_a.push(row(q, a));
        per_question_b.push(row(q, b));
    }

    let pct_a = percentage(total_score_a, total_max_a);
    let pct_b = percentage(total_score_b, total_max_b);

    CompatibilityReport {
        per_question_a,
        per_question_b,
        pct_a,
        pct_b,
        overall_pct: overall_percentage(pct_a, pct_b),
    }
}

pub fn overall_percentage(pct_a: f64, pct_b: f64) -> f64 {
    if pct_a > 0.0 && pct_b > 0.0 {
        bounded(round2((pct_a * pct_b).sqrt()))
    } else {
        0.0
    }
}

fn percentage(total_score: f64, total_max: f64) -> f64 {
    if total_max > 0.0 {
        bounded(round2(total_score / total_max * 100.0))
    } else {
        0.0
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn bounded(v: f64) -> f64 {
    finite_or_zero(v).clamp(0.0, 100.0)
}

fn row(q: &MutualQuestion<'_>, score: DirectionScore) -> QuestionScore {
    QuestionScore {
        question: q.id.clone(),
        text: q.text.to_string(),
        question_number: q.question_number,
        group_number: q.group_number,
        score,
    }
}
