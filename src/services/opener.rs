use std::sync::Mutex;

use tokio::process::Command;

use crate::error::{Result, WorkflowError};

/// Hands the prepared link to whatever plays the role of the browser tab
#[async_trait::async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

/// Opens links with the platform's default handler
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(target_os = "windows") {
            // Passes the URL through untouched; `cmd` would expand `%xx` and split on `&`
            ("rundll32", &["url.dll,FileProtocolHandler"])
        } else {
            ("xdg-open", &[])
        };

        let mut cmd = Command::new(program);
        cmd.args(args).arg(url);
        cmd
    }
}

#[async_trait::async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<()> {
        let status = Self::command(url)
            .status()
            .await
            .map_err(|e| WorkflowError::Opener(e.to_string()))?;

        if !status.success() {
            return Err(WorkflowError::Opener(format!(
                "link handler exited with {}",
                status
            )));
        }
        Ok(())
    }
}

/// Prints the link instead of opening it
pub struct PrintOpener;

#[async_trait::async_trait]
impl LinkOpener for PrintOpener {
    async fn open(&self, url: &str) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}

/// Keeps every opened link in memory
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// An opener whose every call fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LinkOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(WorkflowError::Opener(reason.clone()));
        }
        if let Ok(mut urls) = self.opened.lock() {
            urls.push(url.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_system_command_passes_url_as_single_argument() {
        let url = "https://wa.me/556198574343?text=Ol%C3%A1%21%20Tenho%203%20imagens&x=%25PATH%25";
        let cmd = SystemOpener::command(url);
        let std_cmd = cmd.as_std();

        assert_ne!(std_cmd.get_program(), OsStr::new("cmd"));
        assert_eq!(std_cmd.get_args().last(), Some(OsStr::new(url)));
        assert_eq!(
            std_cmd.get_args().filter(|arg| *arg == OsStr::new(url)).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_recording_opener_keeps_links() {
        let opener = RecordingOpener::new();
        opener.open("https://wa.me/1?text=a").await.unwrap();
        opener.open("https://wa.me/1?text=b").await.unwrap();
        assert_eq!(
            opener.opened(),
            vec!["https://wa.me/1?text=a", "https://wa.me/1?text=b"]
        );
    }

    #[tokio::test]
    async fn test_failing_opener() {
        let opener = RecordingOpener::failing("no browser");
        let err = opener.open("https://wa.me/1").await.unwrap_err();
        assert!(matches!(err, WorkflowError::Opener(ref r) if r == "no browser"));
        assert!(opener.opened().is_empty());
    }
}
