//! Loading session exports into the engine's types
//!
//! An export is a JSON array of sessions in the store's nested shape
//! (sessions with embedded exercises and sets).

use crate::error::{InputError, LiftError, Result};
use crate::models::WorkoutSession;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a JSON array of sessions
pub fn parse_sessions(json: &str) -> Result<Vec<WorkoutSession>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON session export from disk
pub fn load_sessions<P: AsRef<Path>>(path: P) -> Result<Vec<WorkoutSession>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)?;
    let sessions = parse_sessions(&content).map_err(|err| match err {
        LiftError::Json(json_err) => LiftError::from(InputError::InvalidContents {
            path: path.to_path_buf(),
            reason: json_err.to_string(),
        }),
        other => other,
    })?;

    let in_progress = sessions.iter().filter(|s| !s.is_completed()).count();
    if in_progress > 0 {
        warn!(in_progress, "Export contains sessions that were never ended; they are ignored");
    }
    debug!(path = %path.display(), sessions = sessions.len(), "Loaded sessions");

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = r#"[
        {
            "id": "s1",
            "userId": "u1",
            "startedAt": "2024-01-01T10:00:00Z",
            "endedAt": "2024-01-01T11:00:00Z",
            "exercises": []
        },
        {
            "id": "s2",
            "userId": "u1",
            "startedAt": "2024-01-02T10:00:00Z"
        }
    ]"#;

    #[test]
    fn test_parse_sessions() {
        let sessions = parse_sessions(EXPORT).unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].is_completed());
        assert!(!sessions[1].is_completed());
    }

    #[test]
    fn test_load_sessions_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let sessions = load_sessions(file.path()).unwrap();
        assert_eq!(sessions[1].id, "s2");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_sessions("/nonexistent/sessions.json").unwrap_err();
        assert!(matches!(err, LiftError::Input(InputError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"sessions": "nope"}"#).unwrap();

        let err = load_sessions(file.path()).unwrap_err();
        assert!(matches!(err, LiftError::Input(InputError::InvalidContents { .. })));
    }
}
