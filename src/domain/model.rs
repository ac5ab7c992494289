use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 合約的兩方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Contratante, served by `/cli/{id}`
    Contracting,
    /// Contratado (profissional), served by `/pro/{id}`
    Contracted,
}

impl PartyKind {
    pub const ALL: [PartyKind; 2] = [PartyKind::Contracting, PartyKind::Contracted];

    /// Path segment of the record source for this kind.
    pub fn path_segment(&self) -> &'static str {
        match self {
            PartyKind::Contracting => "cli",
            PartyKind::Contracted => "pro",
        }
    }

    pub fn name_field(&self) -> &'static str {
        match self {
            PartyKind::Contracting => "nomeContratante",
            PartyKind::Contracted => "nomeContratado",
        }
    }

    pub fn tax_id_field(&self) -> &'static str {
        match self {
            PartyKind::Contracting => "cpfContratante",
            PartyKind::Contracted => "cpfContratado",
        }
    }

    /// Label used in user facing notices.
    pub fn label(&self) -> &'static str {
        match self {
            PartyKind::Contracting => "contratante",
            PartyKind::Contracted => "profissional",
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyKind::Contracting => write!(f, "contracting"),
            PartyKind::Contracted => write!(f, "contracted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub tax_id: String,
}

impl Party {
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Empty,
    Partial,
    Complete,
}

/// Session data for one assembly run.
///
/// Values are never mutated in place: every transition returns a new state,
/// so a failed fetch can never disturb what was already stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    contracting: Option<Party>,
    contracted: Option<Party>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a state with `party` stored under `kind`, overwriting any previous record.
    #[must_use]
    pub fn with_party(&self, kind: PartyKind, party: Party) -> Self {
        let mut next = self.clone();
        match kind {
            PartyKind::Contracting => next.contracting = Some(party),
            PartyKind::Contracted => next.contracted = Some(party),
        }
        next
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    pub fn party(&self, kind: PartyKind) -> Option<&Party> {
        match kind {
            PartyKind::Contracting => self.contracting.as_ref(),
            PartyKind::Contracted => self.contracted.as_ref(),
        }
    }

    pub fn missing(&self) -> Vec<PartyKind> {
        PartyKind::ALL
            .into_iter()
            .filter(|k| self.party(*k).is_none())
            .collect()
    }

    pub fn status(&self) -> SessionStatus {
        match (&self.contracting, &self.contracted) {
            (Some(_), Some(_)) => SessionStatus::Complete,
            (None, None) => SessionStatus::Empty,
            _ => SessionStatus::Partial,
        }
    }

    /// Both parties, only once the session is complete.
    pub fn parties(&self) -> Option<(&Party, &Party)> {
        match (&self.contracting, &self.contracted) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// The finished, shareable contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub html: String,
    pub path: PathBuf,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareReceipt {
    pub target: String,
    pub location: String,
}
