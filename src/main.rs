use clap::Parser;
use dotenvy::dotenv;
use edit_handoff::models::CustomerForm;
use edit_handoff::services::intake::read_selection;
use edit_handoff::services::opener::{LinkOpener, PrintOpener, SystemOpener};
use edit_handoff::{HandoffConfig, HandoffWorkflow, WorkflowError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send images for editing: builds the WhatsApp request for a set of photos
#[derive(Parser, Debug)]
#[command(name = "edit-handoff", version)]
struct Args {
    /// Image files to send
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Customer full name (prompted when missing)
    #[arg(long)]
    name: Option<String>,

    /// Customer WhatsApp number, any formatting
    #[arg(long)]
    phone: Option<String>,

    /// Print the link instead of opening it
    #[arg(long)]
    print: bool,

    /// Emit the final report as JSON
    #[arg(long)]
    json: bool,

    /// Skip the organization animation delays
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edit_handoff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = HandoffConfig::from_env();
    if args.no_delay {
        config.progress_step_delay = Duration::ZERO;
        config.summary_delay = Duration::ZERO;
    }
    info!("📸 Handoff target: {}", config.link_prefix());

    let opener: Arc<dyn LinkOpener> = if args.print {
        Arc::new(PrintOpener)
    } else {
        Arc::new(SystemOpener)
    };
    let mut workflow = HandoffWorkflow::new(config, opener);

    // 1. Intake
    let files = read_selection(&args.files).await;
    let added = workflow.add_files(files);
    flush_notifications(&mut workflow);
    added?;

    workflow.render_previews(|item| {
        eprintln!(
            "  [{}] {} ({}){}",
            item.index,
            item.display_name,
            item.size_label,
            if item.thumbnail.is_some() { "" } else { " - sem prévia" }
        );
    });

    // 2. Identification
    let requested = workflow.request_handoff();
    flush_notifications(&mut workflow);
    requested?;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let report = loop {
        let name = match &args.name {
            Some(name) => name.clone(),
            None => match prompt(&mut stdin, "Nome Completo *: ").await? {
                Some(name) => name,
                None => {
                    workflow.cancel_form()?;
                    eprintln!("Cancelado.");
                    return Ok(());
                }
            },
        };
        let phone = match &args.phone {
            Some(phone) => phone.clone(),
            None if args.name.is_some() => String::new(),
            None => prompt(&mut stdin, "WhatsApp (opcional): ")
                .await?
                .unwrap_or_default(),
        };

        let form = CustomerForm::new(name, phone);

        // 3. Handoff and feedback
        let result = workflow
            .submit(form, |step| eprintln!("[{:>3}%] {}", step.percent, step.text))
            .await;
        flush_notifications(&mut workflow);

        match result {
            Ok(report) => break report,
            Err(WorkflowError::EmptyCustomerName) if args.name.is_none() => continue,
            Err(e) => return Err(e.into()),
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!();
        eprint!("{}", report.summary);
    }

    workflow.dismiss_summary()?;
    info!("✅ Session reset");
    Ok(())
}

fn flush_notifications(workflow: &mut HandoffWorkflow) {
    for notification in workflow.take_notifications() {
        eprintln!("{}", notification);
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<Option<String>> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    Ok(lines.next_line().await?)
}
