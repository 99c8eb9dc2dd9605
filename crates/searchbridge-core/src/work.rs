use serde_json::Value;

use crate::assessor::{Assessment, SuccessAssessor};
use crate::error::{BridgeError, Result};
use crate::request::ApiRequest;
use crate::transport::{RawResponse, Transport};

/// Shared services a [`Work`] needs while executing. Owned by the caller and
/// reused across executions; a work never owns its context.
pub struct ExecutionContext<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport
    }
}

type Extract<R> = Box<dyn Fn(&Value) -> Result<R> + Send + Sync>;
type Fallback<R> = Box<dyn Fn(&RawResponse) -> Result<R> + Send + Sync>;

/// One discrete operation against the search service: a frozen request, the
/// success policy to judge the response with, and the extraction step that
/// turns an approved body into a typed result.
///
/// Stateless after construction; executing twice performs two independent,
/// identically-parameterized calls.
pub struct Work<R> {
    request: ApiRequest,
    assessor: SuccessAssessor,
    extract: Extract<R>,
    on_ignored: Option<Fallback<R>>,
}

impl<R> Work<R> {
    /// A work under the default policy: only 2xx responses succeed.
    pub fn new(
        request: ApiRequest,
        extract: impl Fn(&Value) -> Result<R> + Send + Sync + 'static,
    ) -> Self {
        Self {
            request,
            assessor: SuccessAssessor::DEFAULT,
            extract: Box::new(extract),
            on_ignored: None,
        }
    }

    /// A work whose assessor whitelists some failure statuses. Whitelisted
    /// responses are handed to `fallback`, which inspects them and either
    /// returns the operation's benign result or rejects after all — a status
    /// alone does not always identify the benign case.
    pub fn absorbing(
        request: ApiRequest,
        assessor: SuccessAssessor,
        fallback: impl Fn(&RawResponse) -> Result<R> + Send + Sync + 'static,
        extract: impl Fn(&Value) -> Result<R> + Send + Sync + 'static,
    ) -> Self {
        debug_assert!(
            assessor.has_ignored(),
            "an absorbing work needs a non-empty ignore table"
        );
        Self {
            request,
            assessor,
            extract: Box::new(extract),
            on_ignored: Some(Box::new(fallback)),
        }
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Sends the bound request and interprets the response.
    ///
    /// Failure kinds stay distinct: a [`BridgeError::Transport`] means the
    /// call itself never completed, a [`BridgeError::Rejected`] means the
    /// service answered and refused, and a [`BridgeError::Assertion`] means an
    /// approved response was missing data this operation's contract
    /// guarantees.
    pub fn execute(&self, context: &ExecutionContext<'_>) -> Result<R> {
        let response = context.transport().send(&self.request)?;
        match self.assessor.assess(&response) {
            Assessment::Success => {
                let parsed = parse_body(&response.body)?;
                (self.extract)(&parsed)
            }
            Assessment::Ignorable => {
                tracing::debug!(
                    path = %self.request.path(),
                    status = response.status,
                    "absorbing whitelisted failure status"
                );
                match &self.on_ignored {
                    Some(fallback) => fallback(&response),
                    None => Err(BridgeError::Assertion(format!(
                        "status {} whitelisted but the operation declares no benign result",
                        response.status
                    ))),
                }
            }
            Assessment::Hard => Err(BridgeError::Rejected {
                status: response.status,
                body: response.body,
            }),
        }
    }
}

fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        // HEAD responses and some 2xx acknowledgements carry no body.
        return Ok(Value::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_str(body)?)
}
