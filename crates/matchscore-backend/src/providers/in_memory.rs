use std::collections::HashMap;

use matchscore_core::{AnswerRecord, ControlsRecord, QuestionRecord};

use crate::error::BackendError;
use crate::traits::BackendClient;

#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    controls: Option<ControlsRecord>,
    questions: Vec<QuestionRecord>,
    answers: HashMap<String, Vec<AnswerRecord>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controls(mut self, controls: ControlsRecord) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn with_questions(mut self, questions: Vec<QuestionRecord>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_answers(mut self, user: impl Into<String>, answers: Vec<AnswerRecord>) -> Self {
        self.answers.insert(user.into(), answers);
        self
    }
}

#[async_trait::async_trait]
impl BackendClient for InMemoryBackend {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn fetch_controls(&self) -> Result<ControlsRecord, BackendError> {
        self.controls.ok_or_else(|| BackendError::Api {
            status: 404,
            body: "controls not configured".to_string(),
        })
    }

    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, BackendError> {
        Ok(self.questions.clone())
    }

    async fn fetch_answers(&self, user: &str) -> Result<Vec<AnswerRecord>, BackendError> {
        self.answers
            .get(user)
            .cloned()
            .ok_or_else(|| BackendError::Api {
                status: 404,
                body: format!("unknown user: {user}"),
            })
    }
}
