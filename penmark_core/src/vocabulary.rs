//! Saved-word vocabulary storage

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::{PenmarkError, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

/// Word saved by the learner together with the example sentences kept for it
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWord {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub id: i64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub word: String,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub examples: Vec<String>,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub parts_of_speech: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "python")]
#[pymethods]
impl SavedWord {
    #[getter(created_at)]
    fn py_created_at(&self) -> String {
        self.created_at.to_rfc3339()
    }

    fn __repr__(&self) -> String {
        format!(
            "SavedWord(id={}, word='{}', examples={})",
            self.id,
            self.word,
            self.examples.len()
        )
    }
}

const SELECT_COLUMNS: &str = "SELECT id, word, examples, parts_of_speech, created_at FROM saved_words";

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, String, DateTime<Utc>)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode_word(raw: (i64, String, String, String, DateTime<Utc>)) -> Result<SavedWord> {
    let (id, word, examples, parts_of_speech, created_at) = raw;
    Ok(SavedWord {
        id,
        word,
        examples: serde_json::from_str(&examples)?,
        parts_of_speech: serde_json::from_str(&parts_of_speech)?,
        created_at,
    })
}

fn word_key(word: &str) -> String {
    word.to_lowercase()
}

/// Append the items of `extra` that `target` does not already hold
fn merge_unique(target: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        let item = item.trim();
        if !item.is_empty() && !target.iter().any(|t| t == item) {
            target.push(item.to_string());
        }
    }
}

/// Create the saved-word table on an open connection
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS saved_words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            word_key TEXT NOT NULL UNIQUE,
            examples TEXT NOT NULL DEFAULT '[]',
            parts_of_speech TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Open (or create) the database file and ensure the schema exists
pub fn init_database(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Save a word, merging examples into an existing entry for the same word
pub fn add_word(
    conn: &Connection,
    word: &str,
    examples: &[String],
    parts_of_speech: &[String],
) -> Result<SavedWord> {
    let word = word.trim();
    if word.is_empty() {
        return Err(PenmarkError::invalid_input("word must not be empty"));
    }
    let key = word_key(word);

    let existing = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE word_key = ?1"),
            params![key],
            word_from_row,
        )
        .optional()?;

    if let Some(raw) = existing {
        let mut saved = decode_word(raw)?;
        merge_unique(&mut saved.examples, examples);
        merge_unique(&mut saved.parts_of_speech, parts_of_speech);
        conn.execute(
            "UPDATE saved_words SET examples = ?1, parts_of_speech = ?2 WHERE id = ?3",
            params![
                serde_json::to_string(&saved.examples)?,
                serde_json::to_string(&saved.parts_of_speech)?,
                saved.id
            ],
        )?;
        log::info!("merged examples into saved word '{}' (id={})", saved.word, saved.id);
        return Ok(saved);
    }

    let mut saved = SavedWord {
        id: 0,
        word: word.to_string(),
        examples: Vec::new(),
        parts_of_speech: Vec::new(),
        created_at: Utc::now(),
    };
    merge_unique(&mut saved.examples, examples);
    merge_unique(&mut saved.parts_of_speech, parts_of_speech);

    conn.execute(
        "INSERT INTO saved_words (word, word_key, examples, parts_of_speech, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            saved.word,
            key,
            serde_json::to_string(&saved.examples)?,
            serde_json::to_string(&saved.parts_of_speech)?,
            saved.created_at
        ],
    )?;
    saved.id = conn.last_insert_rowid();
    log::info!("saved word '{}' (id={})", saved.word, saved.id);
    Ok(saved)
}

/// All saved words, newest first
pub fn list_words(conn: &Connection) -> Result<Vec<SavedWord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))?;
    let rows = stmt.query_map([], word_from_row)?;

    let mut words = Vec::new();
    for raw in rows {
        words.push(decode_word(raw?)?);
    }
    Ok(words)
}

/// Get a single saved word by ID
pub fn get_word(conn: &Connection, id: i64) -> Result<Option<SavedWord>> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        word_from_row,
    )
    .optional()?
    .map(decode_word)
    .transpose()
}

/// Delete a saved word; false when no such word existed
pub fn delete_word(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM saved_words WHERE id = ?1", params![id])?;
    if deleted > 0 {
        log::info!("deleted saved word id={id}");
    }
    Ok(deleted > 0)
}

pub fn word_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM saved_words", [], |row| row.get(0))?)
}

// ============= Python Bindings =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "init_database")]
pub fn py_init_database(db_path: &str) -> PyResult<()> {
    init_database(db_path)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "add_word")]
pub fn py_add_word(
    db_path: &str,
    word: &str,
    examples: Vec<String>,
    parts_of_speech: Option<Vec<String>>,
) -> PyResult<SavedWord> {
    let conn = init_database(db_path)?;
    Ok(add_word(&conn, word, &examples, &parts_of_speech.unwrap_or_default())?)
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "list_words")]
pub fn py_list_words(db_path: &str) -> PyResult<Vec<SavedWord>> {
    let conn = init_database(db_path)?;
    Ok(list_words(&conn)?)
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "delete_word")]
pub fn py_delete_word(db_path: &str, id: i64) -> PyResult<bool> {
    let conn = init_database(db_path)?;
    Ok(delete_word(&conn, id)?)
}
