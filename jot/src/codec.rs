//! Pure translation between statements and the `/v2/pipeline` JSON bodies.

use crate::error::JotError;
use jot_types::{PipelineRequest, PipelineResponse, Stmt, StreamError, StreamRequest, StreamResult};

/// Serialize statements as `execute` directives followed by a single `close`,
/// so the server-side stream is never left open.
pub fn encode_request(stmts: &[Stmt]) -> Result<Vec<u8>, JotError> {
    let mut requests: Vec<StreamRequest> = stmts
        .iter()
        .map(|stmt| StreamRequest::Execute { stmt: stmt.clone() })
        .collect();
    requests.push(StreamRequest::Close);

    serde_json::to_vec(&PipelineRequest { requests }).map_err(|e| JotError::Encoding(e.to_string()))
}

pub fn decode_response(bytes: &[u8]) -> Result<PipelineResponse, JotError> {
    serde_json::from_slice(bytes).map_err(|e| JotError::Decoding(e.to_string()))
}

/// First embedded statement error, in request order
pub fn first_error(response: &PipelineResponse) -> Option<&StreamError> {
    response.results.iter().find_map(|r| match r {
        StreamResult::Error { error } => Some(error),
        _ => None,
    })
}
