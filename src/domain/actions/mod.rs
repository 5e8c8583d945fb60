//! Pending actions: user mutations submitted but not yet confirmed by the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub merchandise_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// A requested quantity. Signed so that arithmetic done by callers can
/// undershoot; the reconciler clamps it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpdate {
    pub id: String,
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ActionKind {
    LinesAdd { lines: Vec<LineInput> },
    #[serde(rename_all = "camelCase")]
    LinesRemove { line_ids: Vec<String> },
    LinesUpdate { lines: Vec<LineUpdate> },
    #[serde(rename_all = "camelCase")]
    SelectVariant { variant_id: String },
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::LinesAdd { .. } => "LinesAdd",
            ActionKind::LinesRemove { .. } => "LinesRemove",
            ActionKind::LinesUpdate { .. } => "LinesUpdate",
            ActionKind::SelectVariant { .. } => "SelectVariant",
        }
    }

    /// Ids of the lines or variant this action targets. Empty for additions.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            ActionKind::LinesAdd { .. } => vec![],
            ActionKind::LinesRemove { line_ids } => line_ids.iter().map(String::as_str).collect(),
            ActionKind::LinesUpdate { lines } => lines.iter().map(|l| l.id.as_str()).collect(),
            ActionKind::SelectVariant { variant_id } => vec![variant_id.as_str()],
        }
    }

    /// Submissions sharing a key supersede each other; different keys are independent.
    pub fn key(&self) -> String {
        match self {
            ActionKind::LinesAdd { lines } => {
                let ids: Vec<&str> = lines.iter().map(|l| l.merchandise_id.as_str()).collect();
                join_key(self.name(), &ids)
            }
            // Removes share the update key so a remove supersedes a pending quantity change.
            ActionKind::LinesRemove { .. } => join_key("LinesUpdate", &self.targets()),
            _ => join_key(self.name(), &self.targets()),
        }
    }
}

/// `LinesUpdate-<id>-<id>` style key.
pub fn join_key(prefix: &str, ids: &[&str]) -> String {
    let mut key = prefix.to_string();
    for id in ids {
        key.push('-');
        key.push_str(id);
    }
    key
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: ActionKind,
    pub submitted_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn submit(kind: ActionKind) -> Self {
        Self { id: Uuid::now_v7(), kind, submitted_at: Utc::now() }
    }

    pub fn key(&self) -> String { self.kind.key() }
}

/// In-flight actions in submission order, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PendingLog { actions: Vec<PendingAction> }

impl PendingLog {
    pub fn new() -> Self { Self::default() }

    pub fn from_actions(mut actions: Vec<PendingAction>) -> Self {
        // Stable: equal timestamps keep caller order.
        actions.sort_by_key(|a| a.submitted_at);
        Self { actions }
    }

    pub fn push(&mut self, action: PendingAction) -> Uuid {
        let id = action.id;
        self.actions.push(action);
        id
    }

    /// Removes a settled action, returning it if it was still pending.
    pub fn take(&mut self, id: Uuid) -> Option<PendingAction> {
        let pos = self.actions.iter().position(|a| a.id == id)?;
        Some(self.actions.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAction> { self.actions.iter() }
    pub fn len(&self) -> usize { self.actions.len() }
    pub fn is_empty(&self) -> bool { self.actions.is_empty() }

    pub fn is_pending(&self, key: &str) -> bool {
        self.actions.iter().any(|a| a.key() == key)
    }
}
