//! JSON request dispatch for the editor channel.
//!
//! A channel message is `[msgid, body]` where `body` carries an `id` naming
//! the request:
//!
//! ```json
//! [1, {"id": "stacktrace#build", "throwpoint": "function F[3]..G, line 2"}]
//! ```
//!
//! Responses echo `msgid`. Failures are reported as `{"error": "..."}`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::errors::StackError;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "id")]
pub enum Request {
    #[serde(rename = "stacktrace#callstack")]
    Callstack,
    #[serde(rename = "stacktrace#build")]
    Build { throwpoint: String },
    #[serde(rename = "stacktrace#histerrs")]
    Histerrs {
        #[serde(default)]
        msghist: Option<String>,
    },
    #[serde(rename = "stacktrace#fromhist")]
    Fromhist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Request {
    pub fn from_body(body: Value) -> Result<Self, StackError> {
        serde_json::from_value(body).map_err(|err| StackError::invalid_request(err.to_string()))
    }
}

/// Run one request against `session` and serialize its result.
pub fn dispatch(session: &Session, request: &Request) -> Result<Value, StackError> {
    let value = match request {
        Request::Callstack => to_value(&session.callstack()?),
        Request::Build { throwpoint } => to_value(&session.build(throwpoint)?),
        Request::Histerrs { msghist } => to_value(&session.histerrs(msghist.as_deref())?),
        Request::Fromhist => to_value(&session.from_history()?),
    };
    value.map_err(|err| StackError::invalid_request(err.to_string()))
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

/// Handle a request body, turning any failure into an error response.
pub fn handle(session: &Session, body: Value) -> Value {
    let result = Request::from_body(body).and_then(|request| {
        debug!("dispatching {request:?}");
        dispatch(session, &request)
    });
    match result {
        Ok(value) => value,
        Err(err) => {
            debug!("request failed: {err}");
            json!({ "error": err.to_string() })
        }
    }
}

/// Handle one raw channel message.
///
/// Returns the encoded response, or `None` for notifications (`msgid <= 0`)
/// and undecodable messages.
pub fn handle_message(session: &Session, raw: &str) -> Option<String> {
    let (msgid, body): (i64, Value) = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(err) => {
            warn!("dropping malformed channel message: {err}");
            return None;
        }
    };
    if msgid <= 0 {
        return None;
    }
    let response = handle(session, body);
    Some(json!([msgid, response]).to_string())
}
