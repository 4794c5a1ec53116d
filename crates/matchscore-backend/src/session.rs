use std::sync::Arc;

use matchscore_core::{
    calculate_compatibility, questions_from_records, AnswerSet, CompatibilityReport,
};
use tracing::debug;

use crate::controls::{ControlsAdvisory, ControlsCache, ControlsResolution};
use crate::error::BackendError;
use crate::traits::BackendClient;

#[derive(Debug, Clone)]
pub struct PairScore {
    pub user_a: String,
    pub user_b: String,
    pub report: CompatibilityReport,
    pub advisory: Option<ControlsAdvisory>,
}

#[derive(Clone)]
pub struct ScoringSession {
    client: Arc<dyn BackendClient>,
    controls: Arc<ControlsCache>,
}

impl ScoringSession {
    pub fn new(client: Arc<dyn BackendClient>, controls: Arc<ControlsCache>) -> Self {
        Self { client, controls }
    }

    pub async fn start(client: Arc<dyn BackendClient>) -> Self {
        let controls = Arc::new(ControlsCache::default());
        controls.refresh(client.as_ref()).await;
        Self::new(client, controls)
    }

    pub fn controls(&self) -> ControlsResolution {
        self.controls.snapshot()
    }

    pub async fn refresh_controls(&self) -> ControlsResolution {
        self.controls.refresh(self.client.as_ref()).await
    }

    pub async fn score_pair(&self, user_a: &str, user_b: &str) -> Result<PairScore, BackendError> {
        let ControlsResolution { controls, advisory } = self.controls.snapshot();

        let (answers_a, answers_b, question_records) = tokio::try_join!(
            self.client.fetch_answers(user_a),
            self.client.fetch_answers(user_b),
            self.client.fetch_questions(),
        )?;

        let set_a = AnswerSet::from_records(&answers_a);
        let set_b = AnswerSet::from_records(&answers_b);
        let questions = questions_from_records(&question_records);
        let report = calculate_compatibility(&set_a, &set_b, &questions, &controls);

        debug!(
            client = self.client.name(),
            user_a,
            user_b,
            mutual = report.mutual_count(),
            overall = report.overall_pct,
            "scored pair"
        );

        Ok(PairScore {
            user_a: user_a.to_string(),
            user_b: user_b.to_string(),
            report,
            advisory,
        })
    }
}
