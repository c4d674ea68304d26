use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub percent: u8,
    pub text: &'static str,
}

pub const ORGANIZATION_STEPS: [ProgressStep; 5] = [
    ProgressStep {
        percent: 20,
        text: "Criando pasta do cliente...",
    },
    ProgressStep {
        percent: 40,
        text: "Verificando formatos de imagem...",
    },
    ProgressStep {
        percent: 60,
        text: "Organizando arquivos...",
    },
    ProgressStep {
        percent: 80,
        text: "Preparando para envio...",
    },
    ProgressStep {
        percent: 100,
        text: "Organização concluída!",
    },
];

/// Timed "organizing files" feedback shown after the link is opened.
/// Purely cosmetic and not cancellable.
pub struct OrganizationProgress {
    step_delay: Duration,
    finish_delay: Duration,
}

impl OrganizationProgress {
    pub fn new(step_delay: Duration, finish_delay: Duration) -> Self {
        Self {
            step_delay,
            finish_delay,
        }
    }

    /// Reports every step, one `step_delay` apart, then waits `finish_delay`.
    pub async fn run<F>(&self, mut on_step: F)
    where
        F: FnMut(&ProgressStep),
    {
        for step in ORGANIZATION_STEPS.iter() {
            sleep(self.step_delay).await;
            tracing::debug!("Organization progress {}%", step.percent);
            on_step(step);
        }
        sleep(self.finish_delay).await;
    }
}
