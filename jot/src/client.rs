//! Typed client for the notes table behind a libSQL `/v2/pipeline` endpoint.

use crate::codec;
use crate::config::{Config, defaults};
use crate::error::JotError;
use crate::projection;
use crate::transport::Transport;
use jot_types::{Note, PipelineResponse, Stmt, StmtResult};

// ── SQL ─────────────────────────────────────────────

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";
const INSERT_SQL: &str = "INSERT INTO notes (body) VALUES (?)";
const LIST_SQL: &str = "SELECT id, body, created_at FROM notes ORDER BY id DESC";
const GET_SQL: &str = "SELECT id, body, created_at FROM notes WHERE id = ?";
const LATEST_SQL: &str = "SELECT id, body, created_at FROM notes ORDER BY id DESC LIMIT 1";
const DELETE_SQL: &str = "DELETE FROM notes WHERE id = ?";

pub struct NoteClient<T> {
    pipeline_url: String,
    token: String,
    transport: T,
}

// ── Client impl ─────────────────────────────────────

impl<T: Transport> NoteClient<T> {
    pub fn new(config: &Config, transport: T) -> Self {
        Self {
            pipeline_url: format!(
                "{}{}",
                config.url.trim_end_matches('/'),
                defaults::PIPELINE_PATH
            ),
            token: config.token.clone(),
            transport,
        }
    }

    /// Send statements as one pipeline and surface any failure as a `JotError`.
    /// An error embedded in a 200 response is reported like an HTTP error.
    async fn execute(&self, stmts: &[Stmt]) -> Result<PipelineResponse, JotError> {
        let body = codec::encode_request(stmts)?;

        log::debug!("[jot] POST {} ({} statement(s))", self.pipeline_url, stmts.len());
        let reply = self.transport.post_json(&self.pipeline_url, &self.token, body).await?;
        log::debug!("[jot] pipeline answered HTTP {} ({} bytes)", reply.status, reply.body.len());

        if !reply.is_success() {
            return Err(JotError::Remote {
                status: Some(reply.status),
                message: String::from_utf8_lossy(&reply.body).into_owned(),
            });
        }

        let response = codec::decode_response(&reply.body)?;

        if let Some(err) = codec::first_error(&response) {
            return Err(JotError::Remote {
                status: None,
                message: err.message.clone(),
            });
        }

        Ok(response)
    }

    async fn execute_one(&self, stmt: Stmt) -> Result<PipelineResponse, JotError> {
        self.execute(std::slice::from_ref(&stmt)).await
    }

    /// Create the notes table if it does not exist yet
    pub async fn init_schema(&self) -> Result<(), JotError> {
        self.execute_one(Stmt::new(CREATE_TABLE_SQL)).await?;
        Ok(())
    }

    /// Insert a note and return its new id
    pub async fn add(&self, body: &str) -> Result<i64, JotError> {
        if body.trim().is_empty() {
            return Err(JotError::Usage("note body is empty".to_string()));
        }

        let resp = self.execute_one(Stmt::new(INSERT_SQL).bind_text(body)).await?;
        let rowid = first_result(&resp)?
            .last_insert_rowid
            .as_deref()
            .ok_or_else(|| JotError::Decoding("insert returned no last_insert_rowid".to_string()))?;

        rowid
            .trim()
            .parse::<i64>()
            .map_err(|e| JotError::Decoding(format!("last_insert_rowid {:?}: {}", rowid, e)))
    }

    /// All notes, newest first
    pub async fn list(&self) -> Result<Vec<Note>, JotError> {
        let resp = self.execute_one(Stmt::new(LIST_SQL)).await?;
        Ok(projection::notes_from_result(&resp, 0))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Note, JotError> {
        let resp = self.execute_one(Stmt::new(GET_SQL).bind_integer(id)).await?;
        projection::notes_from_result(&resp, 0)
            .into_iter()
            .next()
            .ok_or_else(|| JotError::note_not_found(id))
    }

    /// The most recently created note
    pub async fn get_latest(&self) -> Result<Note, JotError> {
        let resp = self.execute_one(Stmt::new(LATEST_SQL)).await?;
        projection::notes_from_result(&resp, 0)
            .into_iter()
            .next()
            .ok_or_else(JotError::no_notes)
    }

    /// Delete a note. Deleting an id that does not exist is an error.
    pub async fn delete(&self, id: i64) -> Result<(), JotError> {
        let resp = self.execute_one(Stmt::new(DELETE_SQL).bind_integer(id)).await?;
        if first_result(&resp)?.affected_row_count == 0 {
            return Err(JotError::note_not_found(id));
        }
        Ok(())
    }
}

fn first_result(resp: &PipelineResponse) -> Result<&StmtResult, JotError> {
    resp.results
        .first()
        .and_then(|r| r.execute_result())
        .ok_or_else(|| JotError::Decoding("pipeline returned no statement result".to_string()))
}
