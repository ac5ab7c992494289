use crate::core::template::ContractText;
use crate::core::{DocumentPrinter, RecordSource, ShareTarget};
use crate::domain::model::{Document, PartyKind, SessionState, ShareReceipt};
use crate::utils::error::{ContractError, Result};
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::validate_identifier;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The identifiers used to look up both parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyIds {
    pub contracting: String,
    pub contracted: String,
}

impl PartyIds {
    pub fn new(contracting: impl Into<String>, contracted: impl Into<String>) -> Self {
        Self {
            contracting: contracting.into(),
            contracted: contracted.into(),
        }
    }

    pub fn get(&self, kind: PartyKind) -> &str {
        match kind {
            PartyKind::Contracting => &self.contracting,
            PartyKind::Contracted => &self.contracted,
        }
    }
}

/// Result of fetching both parties: the new state plus whatever failed.
#[derive(Debug)]
pub struct FetchOutcome {
    pub state: SessionState,
    pub errors: Vec<ContractError>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.state.parties().is_some()
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub document: Document,
    pub receipt: Option<ShareReceipt>,
}

pub struct ContractAssembler<R: RecordSource, P: DocumentPrinter> {
    contracting: R,
    contracted: R,
    printer: P,
    share_target: Option<Box<dyn ShareTarget>>,
    monitor: SystemMonitor,
    renders: AtomicU64,
}

impl<R: RecordSource, P: DocumentPrinter> ContractAssembler<R, P> {
    pub fn new(contracting: R, contracted: R, printer: P) -> Result<Self> {
        if contracting.kind() != PartyKind::Contracting || contracted.kind() != PartyKind::Contracted
        {
            return Err(ContractError::ConfigError {
                message: format!(
                    "Record sources wired to the wrong parties: got {} and {}",
                    contracting.kind(),
                    contracted.kind()
                ),
            });
        }

        Ok(Self {
            contracting,
            contracted,
            printer,
            share_target: None,
            monitor: SystemMonitor::new(false),
            renders: AtomicU64::new(0),
        })
    }

    pub fn with_share_target(mut self, target: Box<dyn ShareTarget>) -> Self {
        self.share_target = Some(target);
        self
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    fn source(&self, kind: PartyKind) -> &R {
        match kind {
            PartyKind::Contracting => &self.contracting,
            PartyKind::Contracted => &self.contracted,
        }
    }

    /// Fetches one party and returns the state with it stored.
    ///
    /// An empty identifier is rejected before any request is made. On error the
    /// caller still holds the previous state untouched.
    pub async fn fetch(
        &self,
        state: &SessionState,
        kind: PartyKind,
        identifier: &str,
    ) -> Result<SessionState> {
        validate_identifier(kind, identifier)?;

        tracing::info!("🔎 Fetching {} record '{}'", kind, identifier);
        let party = self.source(kind).fetch(identifier).await?;
        Ok(state.with_party(kind, party))
    }

    /// Fetches both parties concurrently. This is also the reload operation.
    pub async fn fetch_both(&self, state: &SessionState, ids: &PartyIds) -> FetchOutcome {
        let (contracting, contracted) = tokio::join!(
            self.fetch(state, PartyKind::Contracting, &ids.contracting),
            self.fetch(state, PartyKind::Contracted, &ids.contracted),
        );

        let mut next = state.clone();
        let mut errors = Vec::new();

        for (kind, result) in [
            (PartyKind::Contracting, contracting),
            (PartyKind::Contracted, contracted),
        ] {
            match result {
                Ok(fetched) => {
                    if let Some(party) = fetched.party(kind) {
                        next = next.with_party(kind, party.clone());
                    }
                }
                Err(e) => {
                    tracing::warn!("❌ {} fetch failed: {}", kind, e);
                    errors.push(e);
                }
            }
        }

        self.monitor.log_stats("fetch");
        FetchOutcome {
            state: next,
            errors,
        }
    }

    /// Renders the contract for a complete session and prints it.
    pub async fn render(&self, state: &SessionState) -> Result<Document> {
        let (contracting, contracted) = state.parties().ok_or_else(|| ContractError::MissingData {
            missing: state.missing(),
        })?;

        let contract = ContractText::new(contracting, contracted);
        let html = contract.to_html();

        let generated_at = Utc::now();
        // the sequence number keeps renders within one millisecond apart
        let seq = self.renders.fetch_add(1, Ordering::Relaxed);
        let file_stem = format!(
            "contrato-{}-{}",
            generated_at.format("%Y%m%d-%H%M%S%3f"),
            seq
        );
        let path = self.printer.print(&contract, &html, &file_stem).await?;

        self.monitor.log_stats("render");
        Ok(Document {
            html,
            path,
            generated_at,
        })
    }

    /// Dispatches the document once. No retry.
    pub async fn share(&self, document: &Document) -> Result<Option<ShareReceipt>> {
        let Some(target) = &self.share_target else {
            tracing::info!("Sharing disabled, document left at {}", document.path.display());
            return Ok(None);
        };

        match target.share(document).await {
            Ok(receipt) => {
                tracing::info!("📤 PDF compartilhado via {}: {}", receipt.target, receipt.location);
                self.monitor.log_stats("share");
                Ok(Some(receipt))
            }
            Err(e) => {
                tracing::error!("❌ Share via {} failed: {}", target.name(), e);
                Err(e)
            }
        }
    }

    /// Fetch both parties, render, and share.
    pub async fn run(&self, ids: &PartyIds) -> Result<RunReport> {
        tracing::info!("Starting contract assembly");

        let outcome = self.fetch_both(&SessionState::new(), ids).await;
        if let Some(first) = outcome.errors.into_iter().next() {
            return Err(first);
        }

        let document = self.render(&outcome.state).await?;
        let receipt = self.share(&document).await?;

        self.monitor.log_final_stats();
        Ok(RunReport { document, receipt })
    }
}
