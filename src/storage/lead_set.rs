use crate::{
    error::{ConsoleError, Result},
    merge::{self, ImportMode, ImportOutcome},
    model::{Lead, LeadEdit},
};
use tokio::sync::{mpsc, oneshot};

const QUEUE_DEPTH: usize = 32;

/// Work for the lead set writer. Each command carries its own reply channel.
#[derive(Debug)]
enum LeadCommand {
    Snapshot(oneshot::Sender<Vec<Lead>>),
    Load(Vec<Lead>, oneshot::Sender<usize>),
    Import {
        leads: Vec<Lead>,
        mode: ImportMode,
        reply: oneshot::Sender<ImportOutcome>,
    },
    Save(LeadEdit, oneshot::Sender<Result<Lead>>),
    Remove(String, oneshot::Sender<Result<Lead>>),
}

/// Handle to the task that owns the session's lead set.
///
/// All reads and writes go through one queue, so mutations apply strictly in
/// the order they were sent, whatever state the set is in at that moment.
#[derive(Clone)]
pub struct LeadSetHandle {
    tx: mpsc::Sender<LeadCommand>,
}

impl LeadSetHandle {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub fn spawn(initial: Vec<Lead>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        tokio::spawn(LeadSetWriter { leads: initial, rx }.run());
        Self { tx }
    }

    pub async fn snapshot(&self) -> Result<Vec<Lead>> {
        self.request(LeadCommand::Snapshot).await
    }

    /// Replace the whole set, as after a fresh fetch. Returns the new size.
    pub async fn load(&self, leads: Vec<Lead>) -> Result<usize> {
        self.request(|reply| LeadCommand::Load(leads, reply)).await
    }

    pub async fn import(&self, leads: Vec<Lead>, mode: ImportMode) -> Result<ImportOutcome> {
        self.request(|reply| LeadCommand::Import { leads, mode, reply })
            .await
    }

    /// Apply an edit to every lead with the edit's id.
    pub async fn save(&self, edit: LeadEdit) -> Result<Lead> {
        self.request(|reply| LeadCommand::Save(edit, reply)).await?
    }

    /// Remove every lead with `id`, returning the first one removed.
    pub async fn remove(&self, id: &str) -> Result<Lead> {
        let id = id.to_string();
        self.request(|reply| LeadCommand::Remove(id, reply)).await?
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> LeadCommand) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| ConsoleError::Storage("Lead set writer has stopped".to_string()))?;
        rx.await
            .map_err(|_| ConsoleError::Storage("Lead set writer dropped the reply".to_string()))
    }
}

struct LeadSetWriter {
    leads: Vec<Lead>,
    rx: mpsc::Receiver<LeadCommand>,
}

impl LeadSetWriter {
    /// Runs until every handle has been dropped.
    async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.apply(command);
        }
        tracing::debug!("Lead set writer stopped");
    }

    fn apply(&mut self, command: LeadCommand) {
        // A dropped receiver only means the caller stopped waiting; the effect still applies.
        match command {
            LeadCommand::Snapshot(reply) => {
                let _ = reply.send(self.leads.clone());
            }
            LeadCommand::Load(leads, reply) => {
                self.leads = leads;
                let _ = reply.send(self.leads.len());
            }
            LeadCommand::Import { leads, mode, reply } => {
                let current = std::mem::take(&mut self.leads);
                let outcome = merge::apply_import(current, leads, mode);
                tracing::info!(
                    mode = %mode,
                    added = outcome.added,
                    skipped = outcome.skipped,
                    total = outcome.leads.len(),
                    "Imported leads"
                );
                self.leads = outcome.leads.clone();
                let _ = reply.send(outcome);
            }
            LeadCommand::Save(edit, reply) => {
                let mut updated = None;
                for lead in self.leads.iter_mut().filter(|l| l.id == edit.id) {
                    edit.apply_to(lead);
                    updated.get_or_insert_with(|| lead.clone());
                }
                let result = updated.ok_or_else(|| ConsoleError::NotFound(edit.id.clone()));
                let _ = reply.send(result);
            }
            LeadCommand::Remove(id, reply) => {
                let removed = self.leads.iter().find(|l| l.id == id).cloned();
                if removed.is_some() {
                    self.leads.retain(|l| l.id != id);
                }
                let _ = reply.send(removed.ok_or(ConsoleError::NotFound(id)));
            }
        }
    }
}
