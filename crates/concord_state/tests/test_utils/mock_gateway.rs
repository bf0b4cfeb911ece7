//! Mock gateway recording outbound directives.

use async_trait::async_trait;
use concord_error::{ConcordResult, GatewayError};
use concord_gateway::{Gateway, RequestGuildMembers};
use std::sync::{Arc, Mutex};

/// Gateway that records member requests and can be told to fail.
#[derive(Clone, Default)]
pub struct MockGateway {
    requests: Arc<Mutex<Vec<RequestGuildMembers>>>,
    fail: bool,
}

impl MockGateway {
    /// A gateway whose sends always succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose sends always fail.
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests sent so far, including failed ones.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<RequestGuildMembers> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests sent.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn request_guild_members(&self, request: RequestGuildMembers) -> ConcordResult<()> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(GatewayError::new("socket closed").into());
        }
        Ok(())
    }
}
