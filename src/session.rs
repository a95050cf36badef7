//! Per-invocation context passed into every operation

use crate::api::{IdentityProvider, SubscriptionDirectory, TabularSink};
use std::sync::Arc;

/// The remote collaborators one invocation works against
#[derive(Clone)]
pub struct Session {
    pub directory: Arc<dyn SubscriptionDirectory>,
    pub sink: Arc<dyn TabularSink>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl Session {
    pub fn new(
        directory: Arc<dyn SubscriptionDirectory>,
        sink: Arc<dyn TabularSink>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            directory,
            sink,
            identity,
        }
    }
}
