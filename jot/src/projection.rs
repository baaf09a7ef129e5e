//! Turns raw pipeline rows into `Note`s.

use jot_types::{Note, PipelineResponse, Value};

/// Notes from the result at `index`. Rows shorter than `id, body, created_at`
/// are dropped; a missing or non-`execute` result yields nothing.
pub fn notes_from_result(response: &PipelineResponse, index: usize) -> Vec<Note> {
    let Some(result) = response.results.get(index).and_then(|r| r.execute_result()) else {
        return Vec::new();
    };

    result
        .rows
        .iter()
        .map(Vec::as_slice)
        .filter_map(note_from_row)
        .collect()
}

fn note_from_row(row: &[Value]) -> Option<Note> {
    if row.len() < 3 {
        log::debug!("[jot] skipping short row ({} cells)", row.len());
        return None;
    }

    Some(Note {
        id: parse_id(&row[0]),
        body: row[1].to_text(),
        created_at: row[2].to_text(),
    })
}

/// Best effort: an id that does not parse becomes 0 rather than failing the
/// whole listing.
pub fn parse_id(value: &Value) -> i64 {
    let text = value.to_text();
    match text.trim().parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            log::warn!("[jot] unparseable note id {:?}, using 0", text);
            0
        }
    }
}
