//! Session controller — per-session state for the analysis workflow.
//!
//! A session owns everything for one user interaction: extracted resume and
//! job texts, the model API key, the selected analysis kind, the last
//! result, and the follow-up chat transcript. Sessions are created on
//! upload, held in memory only, and torn down on delete.

pub mod handlers;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::AnalysisKind;
use crate::errors::AppError;
use crate::extract::Extraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the follow-up chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub api_key: String,
    pub resume: Extraction,
    pub job: Extraction,
    pub selected_kind: Option<AnalysisKind>,
    pub last_result: Option<String>,
    pub transcript: Vec<ChatTurn>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(api_key: String, resume: Extraction, job: Extraction) -> Self {
        Self {
            id: Uuid::new_v4(),
            api_key,
            resume,
            job,
            selected_kind: None,
            last_result: None,
            transcript: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Selecting a different kind discards the previous result and
    /// transcript. Re-selecting the current kind is a no-op.
    pub fn select_kind(&mut self, kind: AnalysisKind) {
        if self.selected_kind == Some(kind) {
            return;
        }
        self.selected_kind = Some(kind);
        self.last_result = None;
        self.transcript.clear();
    }

    /// A fresh result always starts with an empty transcript.
    pub fn record_result(&mut self, result: String) {
        self.last_result = Some(result);
        self.transcript.clear();
    }

    pub fn push_turn(&mut self, role: Role, content: impl Into<String>) {
        self.transcript.push(ChatTurn {
            role,
            content: content.into(),
        });
    }
}

/// In-memory session store. Nothing is shared across sessions or persisted;
/// dropping the process drops every session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(id, session);
        id
    }

    /// Runs `f` over the session under the read lock. The lock is released
    /// before the closure's result is returned, so callers can snapshot
    /// fields and make network calls without holding it.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session) -> T,
    ) -> Result<T, AppError> {
        let sessions = self.inner.read().expect("session store lock poisoned");
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }

    pub fn with_session_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionStatus;

    fn extraction(text: &str) -> Extraction {
        Extraction {
            text: text.to_string(),
            status: ExtractionStatus::Full,
            warnings: Vec::new(),
        }
    }

    fn session_with_chat() -> Session {
        let mut session = Session::new(
            "key".to_string(),
            extraction("John Doe, Software Engineer"),
            extraction("Senior Software Engineer, 5 years"),
        );
        session.select_kind(AnalysisKind::BasicMatch);
        session.record_result("Match Score: 85%".to_string());
        session.push_turn(Role::User, "What about my gaps?");
        session.push_turn(Role::Assistant, "Focus on cloud experience.");
        session
    }

    #[test]
    fn test_new_session_starts_unselected_and_empty() {
        let session = Session::new("key".to_string(), extraction("r"), extraction("j"));
        assert!(session.selected_kind.is_none());
        assert!(session.last_result.is_none());
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_switching_kind_clears_result_and_transcript() {
        let mut session = session_with_chat();
        session.select_kind(AnalysisKind::SkillGap);

        assert_eq!(session.selected_kind, Some(AnalysisKind::SkillGap));
        assert!(session.last_result.is_none());
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_reselecting_same_kind_preserves_result_and_transcript() {
        let mut session = session_with_chat();
        session.select_kind(AnalysisKind::BasicMatch);

        assert_eq!(session.last_result.as_deref(), Some("Match Score: 85%"));
        assert_eq!(session.transcript.len(), 2);
    }

    #[test]
    fn test_new_result_resets_transcript() {
        let mut session = session_with_chat();
        session.record_result("Regenerated".to_string());

        assert_eq!(session.last_result.as_deref(), Some("Regenerated"));
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_transcript_preserves_turn_order() {
        let session = session_with_chat();
        assert_eq!(session.transcript[0].role, Role::User);
        assert_eq!(session.transcript[1].role, Role::Assistant);
    }

    #[test]
    fn test_store_insert_get_remove_lifecycle() {
        let store = SessionStore::default();
        let id = store.insert(Session::new("key".to_string(), extraction("r"), extraction("j")));

        let api_key = store.with_session(id, |s| s.api_key.clone()).unwrap();
        assert_eq!(api_key, "key");

        store.remove(id).unwrap();
        assert!(matches!(
            store.with_session(id, |_| ()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_store_remove_unknown_session_is_not_found() {
        let store = SessionStore::default();
        assert!(matches!(
            store.remove(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_chat_turn_serde_roundtrip() {
        let turn = ChatTurn {
            role: Role::Assistant,
            content: "reply".to_string(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
        let back: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::Assistant);
    }
}
