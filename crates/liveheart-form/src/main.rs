use std::path::{Path, PathBuf};

use eyre::Result;
use liveheart_core::models::payload::SubmissionPayload;
use liveheart_export::context::ProtocolContext;
use liveheart_export::format::{export_protocol, ExportFormat};
use liveheart_export::render::render_protocol;
use liveheart_form::config::{self, LiveheartConfig};
use liveheart_form::event::FormEvent;
use liveheart_form::fields::FieldStore;
use liveheart_form::form_file::FormFile;
use liveheart_form::orchestrator::Orchestrator;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: liveheart <metrics|payload|report> <form.json> [out.docx|out.xlsx|out.pdf]
       liveheart config";

#[derive(Debug, Clone, Copy)]
enum Command {
    Metrics,
    Payload,
    Report,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("config") => return write_config(),
        Some("metrics") => Command::Metrics,
        Some("payload") => Command::Payload,
        Some("report") => Command::Report,
        _ => return Err(eyre::eyre!(USAGE)),
    };
    let form_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| eyre::eyre!(USAGE))?;
    let out_path = args.next().map(PathBuf::from);

    let config = config::load_config()?;
    let form = FormFile::load(&form_path)?;
    let orchestrator = drive(&form).await?;

    match command {
        Command::Metrics => {
            for reading in orchestrator.evaluation().readings() {
                let info = reading.key.info();
                if reading.display.is_empty() {
                    println!("{:<36} -", info.name);
                } else {
                    println!("{:<36} {} {}", info.name, reading.display, reading.unit);
                }
            }
        }
        Command::Payload => {
            let payload = orchestrator.payload(&form.patient, &form.disabled_sections);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Report => {
            let payload = orchestrator.payload(&form.patient, &form.disabled_sections);
            let rendered = render(&payload, &config)?;
            match out_path {
                Some(path) => write_report(&payload, &rendered, &config, &path)?,
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Structured JSON logging when requested
    if std::env::var_os("LIVEHEART_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the form, replay its recorded segment clicks through the event loop
/// and return the settled orchestrator.
async fn drive(form: &FormFile) -> Result<Orchestrator<FieldStore>> {
    let store = form.to_store()?;
    let activations = form.activations()?;

    let orchestrator = Orchestrator::start(store);
    let (tx, rx) = mpsc::unbounded_channel();
    for id in activations {
        tx.send(FormEvent::SegmentActivated(id))?;
    }
    drop(tx);

    Ok(orchestrator.run(rx).await)
}

fn render(payload: &SubmissionPayload, config: &LiveheartConfig) -> Result<String> {
    let Some(template_path) = &config.template_path else {
        return Ok(render_protocol(payload, &config.styles)?);
    };

    let template = std::fs::read_to_string(template_path).map_err(|e| {
        eyre::eyre!("failed to read template {}: {e}", template_path.display())
    })?;
    let name = template_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("custom.md");
    let context = ProtocolContext::from_payload(payload, &config.styles);
    Ok(liveheart_export::render::render_template(name, &template, &context)?)
}

fn write_report(
    payload: &SubmissionPayload,
    rendered: &str,
    config: &LiveheartConfig,
    path: &Path,
) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let bytes = export_protocol(format, payload, Some(rendered), &config.styles)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), format = format.extension(), "protocol written");
    Ok(())
}

/// Write the effective config back to disk, creating it with defaults or
/// bringing an older file up to the current version.
fn write_config() -> Result<()> {
    let config = config::load_config()?;
    let path = config::save_config(&config)?;
    println!("{}", path.display());
    Ok(())
}
