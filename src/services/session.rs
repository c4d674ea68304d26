use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::HandoffConfig;
use crate::error::{Result, WorkflowError};
use crate::models::{
    CustomerForm, CustomerInfo, Notification, NotificationKind, OrganizationSummary,
    SelectedFile, SessionState,
};
use crate::services::message::{HandoffLink, build_handoff};
use crate::utils::format::folder_name;
use crate::utils::validation::partition_images;

/// User actions the session reacts to. Front ends translate their own input
/// (CLI prompts, UI callbacks) into these and feed them to [`Session::apply`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    FilesAdded(Vec<SelectedFile>),
    FileRemoved(usize),
    HandoffRequested,
    FormCancelled,
    FormSubmitted(CustomerForm),
    HandoffFailed(String),
    OrganizationFinished,
    SummaryDismissed,
    Reset,
}

#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Added(usize),
    Removed(SelectedFile),
    FormOpened,
    FormClosed,
    Link(HandoffLink),
    Summary(OrganizationSummary),
    Cleared,
}

/// Working set, customer data and workflow state for one visitor.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    state: SessionState,
    files: Vec<SelectedFile>,
    customer: Option<CustomerInfo>,
    input_batch: Vec<String>,
    notifications: Vec<Notification>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            files: Vec::new(),
            customer: None,
            input_batch: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn customer(&self) -> Option<&CustomerInfo> {
        self.customer.as_ref()
    }

    /// Names held by the file input since the last batch; emptied on removal
    /// and reset so the same files can be picked again.
    pub fn input_batch(&self) -> &[String] {
        &self.input_batch
    }

    pub fn preview_visible(&self) -> bool {
        !self.files.is_empty()
    }

    /// Drains pending user-facing notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification::new(kind, message));
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            info!(session = %self.id, "{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn expect_state(&self, allowed: &[SessionState], action: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    /// Appends the images from a batch; non-images are dropped.
    /// Returns how many files were accepted.
    pub fn add_files(&mut self, batch: Vec<SelectedFile>) -> Result<usize> {
        self.expect_state(
            &[SessionState::Idle, SessionState::FilesSelected],
            "add files",
        )?;

        let (accepted, rejected) = partition_images(batch);
        if accepted.is_empty() {
            self.notify(
                NotificationKind::Error,
                "Por favor, selecione apenas arquivos de imagem (JPG, PNG, etc.)",
            );
            return Err(WorkflowError::NoImages);
        }

        if !rejected.is_empty() {
            warn!(session = %self.id, "Ignored {} non-image file(s)", rejected.len());
        }

        let added = accepted.len();
        self.input_batch = accepted.iter().map(|f| f.name.clone()).collect();
        self.files.extend(accepted);
        self.transition(SessionState::FilesSelected);
        self.notify(
            NotificationKind::Success,
            format!("{} imagem(ns) adicionada(s) com sucesso!", added),
        );
        Ok(added)
    }

    pub fn remove_file(&mut self, index: usize) -> Result<SelectedFile> {
        self.expect_state(&[SessionState::FilesSelected], "remove a file")?;

        if index >= self.files.len() {
            return Err(WorkflowError::FileIndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }

        let removed = self.files.remove(index);
        self.input_batch.clear();
        if self.files.is_empty() {
            self.transition(SessionState::Idle);
        }
        self.notify(NotificationKind::Info, "Imagem removida com sucesso!");
        Ok(removed)
    }

    /// Opens the identification form, provided there is something to send
    pub fn request_handoff(&mut self) -> Result<()> {
        self.expect_state(
            &[SessionState::Idle, SessionState::FilesSelected],
            "request a handoff",
        )?;

        if self.files.is_empty() {
            self.notify(NotificationKind::Error, "Nenhum arquivo selecionado!");
            return Err(WorkflowError::NoFilesSelected);
        }

        self.transition(SessionState::AwaitingCustomerInfo);
        Ok(())
    }

    pub fn cancel_customer_form(&mut self) -> Result<()> {
        self.expect_state(&[SessionState::AwaitingCustomerInfo], "cancel the form")?;
        self.transition(SessionState::FilesSelected);
        Ok(())
    }

    /// Validates the form, stores the customer and builds the handoff link.
    /// An invalid form leaves the session waiting on the form.
    pub fn submit_customer_info(
        &mut self,
        form: CustomerForm,
        config: &HandoffConfig,
    ) -> Result<HandoffLink> {
        self.expect_state(&[SessionState::AwaitingCustomerInfo], "submit the form")?;

        if form.validate().is_err() {
            self.notify(NotificationKind::Error, "Por favor, preencha o nome completo");
            return Err(WorkflowError::EmptyCustomerName);
        }

        let customer = form.into_customer();
        let link = build_handoff(config, &self.files, &customer)?;

        self.notify(
            NotificationKind::Success,
            format!("Dados salvos! Organizando imagens para {}", customer.name),
        );
        info!(
            session = %self.id,
            "Handoff prepared for folder {} with {} file(s)",
            link.folder_name,
            self.files.len()
        );
        self.customer = Some(customer);
        self.transition(SessionState::HandoffInProgress);
        Ok(link)
    }

    /// The link could not be opened; back to the working set so the user can retry.
    /// The customer is dropped too: a retry goes through the form again.
    pub fn handoff_failed(&mut self, reason: &str) -> Result<()> {
        self.expect_state(&[SessionState::HandoffInProgress], "fail a handoff")?;
        warn!(session = %self.id, "Handoff failed: {}", reason);
        self.customer = None;
        self.notify(
            NotificationKind::Error,
            format!("Não foi possível abrir o WhatsApp: {}", reason),
        );
        self.transition(SessionState::FilesSelected);
        Ok(())
    }

    /// Ends the organization sequence and produces the summary shown to the user
    pub fn complete_handoff(&mut self) -> Result<OrganizationSummary> {
        self.expect_state(&[SessionState::HandoffInProgress], "complete a handoff")?;

        let name = self
            .customer
            .as_ref()
            .map(|c| c.name.as_str())
            .ok_or(WorkflowError::EmptyCustomerName)?;

        let summary = OrganizationSummary {
            folder_name: folder_name(name),
            file_count: self.files.len(),
            files: self.files.iter().map(|f| f.name.clone()).collect(),
            created_at: Utc::now(),
        };

        self.transition(SessionState::HandoffComplete);
        Ok(summary)
    }

    pub fn dismiss_summary(&mut self) -> Result<()> {
        self.expect_state(&[SessionState::HandoffComplete], "dismiss the summary")?;
        self.clear();
        Ok(())
    }

    /// Explicit reset by the user. Not available while a handoff is running.
    pub fn reset(&mut self) -> Result<()> {
        if self.state == SessionState::HandoffInProgress {
            return Err(WorkflowError::InvalidTransition {
                state: self.state,
                action: "reset",
            });
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.files.clear();
        self.customer = None;
        self.input_batch.clear();
        self.transition(SessionState::Idle);
    }

    pub fn apply(&mut self, event: SessionEvent, config: &HandoffConfig) -> Result<SessionOutcome> {
        match event {
            SessionEvent::FilesAdded(batch) => self.add_files(batch).map(SessionOutcome::Added),
            SessionEvent::FileRemoved(index) => {
                self.remove_file(index).map(SessionOutcome::Removed)
            }
            SessionEvent::HandoffRequested => {
                self.request_handoff().map(|_| SessionOutcome::FormOpened)
            }
            SessionEvent::FormCancelled => {
                self.cancel_customer_form().map(|_| SessionOutcome::FormClosed)
            }
            SessionEvent::FormSubmitted(form) => self
                .submit_customer_info(form, config)
                .map(SessionOutcome::Link),
            SessionEvent::HandoffFailed(reason) => self
                .handoff_failed(&reason)
                .map(|_| SessionOutcome::FormClosed),
            SessionEvent::OrganizationFinished => {
                self.complete_handoff().map(SessionOutcome::Summary)
            }
            SessionEvent::SummaryDismissed => {
                self.dismiss_summary().map(|_| SessionOutcome::Cleared)
            }
            SessionEvent::Reset => self.reset().map(|_| SessionOutcome::Cleared),
        }
    }
}
