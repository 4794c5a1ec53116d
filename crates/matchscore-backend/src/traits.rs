use async_trait::async_trait;
use matchscore_core::{AnswerRecord, ControlsRecord, QuestionRecord};

use crate::error::BackendError;

#[async_trait]
pub trait BackendClient: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_controls(&self) -> Result<ControlsRecord, BackendError>;

    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, BackendError>;

    async fn fetch_answers(&self, user: &str) -> Result<Vec<AnswerRecord>, BackendError>;
}
