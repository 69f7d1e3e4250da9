//! External collaborators the session calls into.
//!
//! - [`IdentityProvider`]: who is playing
//! - [`Notifier`]: fire-and-forget toasts
//!
//! Neither affects game correctness. A missing or failing identity falls
//! back to a label; a missing notifier drops messages.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::warn;

/// Identity lookup failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("identity lookup failed: {0}")]
pub struct IdentityError(pub String);

/// Supplies the current user's display name.
pub trait IdentityProvider {
    /// The current username, `Ok(None)` when nobody is signed in.
    fn current_username(&self) -> Result<Option<String>, IdentityError>;
}

/// A fixed identity.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    /// Always report `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// Nobody is signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_username(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.0.clone())
    }
}

/// Pick the name to record a score under.
///
/// An explicit non-blank name wins, then the identity provider, then
/// `fallback`. Identity failures are logged and otherwise ignored.
#[must_use]
pub fn resolve_player_name(
    explicit: Option<&str>,
    identity: Option<&dyn IdentityProvider>,
    fallback: &str,
) -> String {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let looked_up = match identity.map(|id| id.current_username()) {
        Some(Ok(name)) => name,
        Some(Err(err)) => {
            warn!(error = %err, "Identity lookup failed, using fallback name");
            None
        }
        None => None,
    };

    looked_up
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// Receives user-visible notifications.
pub trait Notifier {
    /// Show `message`. Must not fail.
    fn toast(&self, kind: ToastKind, message: &str);
}

/// Drops every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn toast(&self, _kind: ToastKind, _message: &str) {}
}

/// Keeps every message; clones share the log.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<(ToastKind, String)>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<(ToastKind, String)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push((kind, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenIdentity;

    impl IdentityProvider for BrokenIdentity {
        fn current_username(&self) -> Result<Option<String>, IdentityError> {
            Err(IdentityError("offline".to_string()))
        }
    }

    #[test]
    fn test_explicit_name_wins() {
        let id = StaticIdentity::named("from_identity");
        assert_eq!(resolve_player_name(Some(" typed "), Some(&id), "anon"), "typed");
    }

    #[test]
    fn test_blank_explicit_falls_through() {
        let id = StaticIdentity::named("reddit_user");
        assert_eq!(resolve_player_name(Some("   "), Some(&id), "anon"), "reddit_user");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(resolve_player_name(None, None, "anon"), "anon");
        assert_eq!(
            resolve_player_name(None, Some(&StaticIdentity::anonymous()), "anon"),
            "anon"
        );
        assert_eq!(resolve_player_name(None, Some(&BrokenIdentity), "anon"), "anon");
        assert_eq!(
            resolve_player_name(None, Some(&StaticIdentity::named("")), "anon"),
            "anon"
        );
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.toast(ToastKind::Success, "saved");
        NoopNotifier.toast(ToastKind::Failure, "dropped");

        assert_eq!(handle.messages(), vec![(ToastKind::Success, "saved".to_string())]);
    }
}
