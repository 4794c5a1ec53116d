use serde::Serialize;

use crate::importance::importance_factor;
use crate::model::{Answer, Controls, OPEN_ANSWER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Open,
    Match,
    Mismatch,
}

#[derive(Debug, Clone, Copy)]
pub struct DirectionInput {
    pub looking_for_answer: u8,
    pub looking_for_open_to_all: bool,
    pub counterpart_me_answer: u8,
    pub counterpart_me_open_to_all: bool,
    pub importance: u8,
}

impl DirectionInput {
    pub fn between(preferrer: &Answer, counterpart: &Answer) -> Self {
        Self {
            looking_for_answer: preferrer.looking_for.answer,
            looking_for_open_to_all: preferrer.looking_for.open_to_all,
            counterpart_me_answer: counterpart.me.answer,
            counterpart_me_open_to_all: counterpart.me.open_to_all,
            importance: preferrer.looking_for.importance,
        }
    }

    fn is_open(&self) -> bool {
        self.looking_for_open_to_all
            || self.looking_for_answer == OPEN_ANSWER
            || self.counterpart_me_answer == OPEN_ANSWER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionScore {
    pub score: f64,
    pub max: f64,
    pub delta: Option<u8>,
    pub status: MatchStatus,
}

pub fn score_direction(input: &DirectionInput, controls: &Controls) -> DirectionScore {
    // Openness is a flat credit that importance neither inflates nor zeroes.
    if input.is_open() {
        return DirectionScore {
            score: finite_or_zero(controls.adjust * controls.ota),
            max: finite_or_zero(controls.adjust),
            delta: None,
            status: MatchStatus::Open,
        };
    }

    let delta = input.looking_for_answer.abs_diff(input.counterpart_me_answer);
    let status = if delta == 0 {
        MatchStatus::Match
    } else {
        MatchStatus::Mismatch
    };

    let factor = importance_factor(f64::from(input.importance), controls.exponent);
    if factor == 0.0 {
        return DirectionScore {
            score: 0.0,
            max: 0.0,
            delta: Some(delta),
            status,
        };
    }

    let raw = controls.adjust - f64::from(delta);
    DirectionScore {
        score: finite_or_zero((raw * factor).max(0.0)),
        max: finite_or_zero(controls.adjust * factor),
        delta: Some(delta),
        status,
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
