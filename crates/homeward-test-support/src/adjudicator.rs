//! Test adjudicators.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use homeward_adjudicator::{
    AdjudicationError, AdjudicationRequest, AdjudicationResponse, Adjudicator,
};

/// An adjudicator that answers from a queue of scripted results and records
/// every request it receives. An exhausted queue answers with a transport
/// error.
#[derive(Debug, Default)]
pub struct ScriptedAdjudicator {
    script: Mutex<VecDeque<Result<AdjudicationResponse, AdjudicationError>>>,
    requests: Mutex<Vec<AdjudicationRequest>>,
}

impl ScriptedAdjudicator {
    /// An adjudicator that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = AdjudicationResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues another result, success or failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push(&self, result: Result<AdjudicationResponse, AdjudicationError>) {
        self.script.lock().unwrap().push_back(result);
    }

    /// Every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<AdjudicationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Adjudicator for ScriptedAdjudicator {
    async fn adjudicate(
        &self,
        request: &AdjudicationRequest,
    ) -> Result<AdjudicationResponse, AdjudicationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdjudicationError::Transport("script exhausted".into())))
    }
}

/// An adjudicator that is never reachable.
#[derive(Debug)]
pub struct FailingAdjudicator;

#[async_trait]
impl Adjudicator for FailingAdjudicator {
    async fn adjudicate(
        &self,
        _request: &AdjudicationRequest,
    ) -> Result<AdjudicationResponse, AdjudicationError> {
        Err(AdjudicationError::Transport("connection refused".into()))
    }
}
