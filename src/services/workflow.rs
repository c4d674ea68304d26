use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::config::HandoffConfig;
use crate::error::Result;
use crate::models::{CustomerForm, Notification, OrganizationSummary, SelectedFile};
use crate::services::message::HandoffLink;
use crate::services::opener::LinkOpener;
use crate::services::preview::{PreviewItem, PreviewService};
use crate::services::progress::{OrganizationProgress, ProgressStep};
use crate::services::session::Session;

/// What a finished handoff produced
#[derive(Debug, Clone, Serialize)]
pub struct HandoffReport {
    pub link: HandoffLink,
    pub summary: OrganizationSummary,
}

/// Drives one session through intake, identification, handoff and feedback.
pub struct HandoffWorkflow {
    config: HandoffConfig,
    session: Session,
    previews: PreviewService,
    progress: OrganizationProgress,
    opener: Arc<dyn LinkOpener>,
}

impl HandoffWorkflow {
    pub fn new(config: HandoffConfig, opener: Arc<dyn LinkOpener>) -> Self {
        let previews = PreviewService::new(config.preview_size);
        let progress = OrganizationProgress::new(config.progress_step_delay, config.summary_delay);
        Self {
            config,
            session: Session::new(),
            previews,
            progress,
            opener,
        }
    }

    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.session.take_notifications()
    }

    pub fn add_files(&mut self, batch: Vec<SelectedFile>) -> Result<usize> {
        self.session.add_files(batch)
    }

    pub fn remove_file(&mut self, index: usize) -> Result<SelectedFile> {
        self.session.remove_file(index)
    }

    /// Rebuilds the preview grid for the current working set
    pub fn render_previews<F>(&self, render: F) -> usize
    where
        F: FnMut(&PreviewItem),
    {
        if !self.session.preview_visible() {
            return 0;
        }
        self.previews.render_all(self.session.files(), render)
    }

    pub fn request_handoff(&mut self) -> Result<()> {
        self.session.request_handoff()
    }

    pub fn cancel_form(&mut self) -> Result<()> {
        self.session.cancel_customer_form()
    }

    /// Submits the form, opens the link and plays the organization sequence.
    /// The session is left on the summary until [`dismiss_summary`](Self::dismiss_summary).
    pub async fn submit<F>(&mut self, form: CustomerForm, on_step: F) -> Result<HandoffReport>
    where
        F: FnMut(&ProgressStep),
    {
        let link = self.session.submit_customer_info(form, &self.config)?;

        if let Err(e) = self.opener.open(&link.url).await {
            error!(session = %self.session.id(), "Failed to open handoff link: {}", e);
            self.session.handoff_failed(&e.to_string())?;
            return Err(e);
        }
        info!(session = %self.session.id(), "Opened handoff link ({} bytes)", link.url.len());

        self.progress.run(on_step).await;
        let summary = self.session.complete_handoff()?;

        Ok(HandoffReport { link, summary })
    }

    pub fn dismiss_summary(&mut self) -> Result<()> {
        self.session.dismiss_summary()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.session.reset()
    }
}
