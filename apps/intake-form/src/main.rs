mod client;
mod form;
mod prompt;
mod validation;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::HttpIntakeClient;
use crate::form::{CandidateForm, Field, SelectedFile, SubmitOutcome};

/// Formulario de Inscripción de Candidato.
///
/// Fields may be passed as flags; `--interactive` prompts for the rest and
/// offers a retry with the entered values after a failed submission.
#[derive(Debug, Parser)]
#[command(name = "intake-form", version, about)]
struct Args {
    /// Base URL of the talent API.
    #[arg(long, env = "INTAKE_API_URL", default_value = "http://localhost:3010")]
    api_url: String,

    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    education: Option<String>,
    #[arg(long)]
    experience: Option<String>,

    /// CV to upload (PDF or DOCX, max 5 MB).
    #[arg(long)]
    cv: Option<PathBuf>,

    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn text_values(&self) -> [(Field, Option<&String>); 7] {
        [
            (Field::Name, self.name.as_ref()),
            (Field::LastName, self.last_name.as_ref()),
            (Field::Email, self.email.as_ref()),
            (Field::Phone, self.phone.as_ref()),
            (Field::Address, self.address.as_ref()),
            (Field::Education, self.education.as_ref()),
            (Field::Experience, self.experience.as_ref()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let client = HttpIntakeClient::new(&args.api_url);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let mut form = CandidateForm::new();
    for (field, value) in args.text_values() {
        if let Some(value) = value {
            form.set(field, value.as_str());
        }
    }
    if let Some(path) = &args.cv {
        match SelectedFile::from_path(path) {
            Ok(file) => form.select_file(file),
            Err(e) => writeln!(out, "No se pudo leer '{}': {e}", path.display())?,
        }
    }

    writeln!(out, "Formulario de Inscripción de Candidato → {}", client.endpoint())?;

    loop {
        if args.interactive {
            prompt::fill_form(&mut form, &mut input, &mut out)?;
        }

        let outcome = form.submit(&client).await;
        prompt::render(&form, &mut out)?;

        match outcome {
            SubmitOutcome::Created(record) => {
                writeln!(out, "Candidato #{} guardado ({})", record.id, record.cv_path)?;
                return Ok(ExitCode::SUCCESS);
            }
            SubmitOutcome::Invalid | SubmitOutcome::Failed => {
                if !args.interactive
                    || !prompt::confirm(&mut input, &mut out, "¿Corregir y reintentar?")?
                {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
}
