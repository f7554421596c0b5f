//! Terminal rendering of the form: field prompts, error list, status banner.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::form::{CandidateForm, Field, SelectedFile};

/// Asks for every field in order. An empty answer keeps the current value,
/// so a retry after a failed submission only needs the corrections.
pub fn fill_form<R: BufRead, W: Write>(
    form: &mut CandidateForm,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    for field in Field::TEXT {
        let answer = ask(input, out, field.label(), form.value(field))?;
        if let Some(answer) = answer {
            form.set(field, answer);
        }
        if let Some(error) = form.error(field) {
            writeln!(out, "  ! {error}")?;
        }
    }

    let current = form.cv().map(|f| f.file_name.clone()).unwrap_or_default();
    if let Some(path) = ask(input, out, Field::Cv.label(), &current)? {
        match SelectedFile::from_path(Path::new(&path)) {
            Ok(file) => form.select_file(file),
            Err(e) => writeln!(out, "  ! No se pudo leer '{path}': {e}")?,
        }
    }
    if let Some(error) = form.error(Field::Cv) {
        writeln!(out, "  ! {error}")?;
    }
    Ok(())
}

/// Prints the status banner, then one line per field error.
pub fn render<W: Write>(form: &CandidateForm, out: &mut W) -> io::Result<()> {
    if let Some(banner) = form.banner() {
        writeln!(out, "{banner}")?;
    }
    for (field, message) in form.errors() {
        writeln!(out, "  {}: {message}", field.label())?;
    }
    Ok(())
}

/// Yes/no question; anything but `s`/`si`/`sí`/`y`/`yes` is a no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} [s/N]: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    ))
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    current: &str,
) -> io::Result<Option<String>> {
    if current.is_empty() {
        write!(out, "{label}: ")?;
    } else {
        write!(out, "{label} [{current}]: ")?;
    }
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim_end_matches(['\r', '\n']).trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::form::Banner;
    use crate::validation::PDF_TYPE;

    #[test]
    fn test_fill_form_reads_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let cv = dir.path().join("cv.pdf");
        std::fs::write(&cv, b"%PDF-1.4").unwrap();

        let script = format!(
            "Ana\nGarcía\nana@example.com\n600000000\nCalle Mayor 1\nUPM\n5 años\n{}\n",
            cv.display()
        );
        let mut input = Cursor::new(script.into_bytes());
        let mut out = Vec::new();
        let mut form = CandidateForm::new();

        fill_form(&mut form, &mut input, &mut out).unwrap();

        assert_eq!(form.value(Field::LastName), "García");
        assert_eq!(form.value(Field::Experience), "5 años");
        assert_eq!(form.cv().map(|f| f.mime_type.as_str()), Some(PDF_TYPE));
        assert!(form.validate());
    }

    #[test]
    fn test_blank_answers_keep_current_values() {
        let mut form = CandidateForm::new();
        form.set(Field::Name, "Ana");
        form.set(Field::Email, "ana@example");

        let mut input = Cursor::new(b"\n\nana@example.com\n\n\n\n\n\n".to_vec());
        let mut out = Vec::new();
        fill_form(&mut form, &mut input, &mut out).unwrap();

        assert_eq!(form.value(Field::Name), "Ana");
        assert_eq!(form.value(Field::Email), "ana@example.com");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Nombre [Ana]: "));
    }

    #[test]
    fn test_rejected_cv_prints_error() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, b"\x89PNG").unwrap();

        let script = format!("\n\n\n\n\n\n\n{}\n", photo.display());
        let mut input = Cursor::new(script.into_bytes());
        let mut out = Vec::new();
        let mut form = CandidateForm::new();
        fill_form(&mut form, &mut input, &mut out).unwrap();

        assert!(form.cv().is_none());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Solo se permiten archivos PDF o DOCX"));
    }

    #[test]
    fn test_render_lists_errors() {
        let mut form = CandidateForm::new();
        form.validate();
        let mut out = Vec::new();

        render(&form, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Nombre: El nombre es obligatorio"));
        assert!(printed.contains("El CV es obligatorio"));
        assert!(!printed.contains(&Banner::Failure.to_string()));
    }

    #[test]
    fn test_confirm_answers() {
        let mut out = Vec::new();
        assert!(confirm(&mut Cursor::new(b"s\n".to_vec()), &mut out, "?").unwrap());
        assert!(confirm(&mut Cursor::new("Sí\n".as_bytes().to_vec()), &mut out, "?").unwrap());
        assert!(!confirm(&mut Cursor::new(b"\n".to_vec()), &mut out, "?").unwrap());
        assert!(!confirm(&mut Cursor::new(b"no\n".to_vec()), &mut out, "?").unwrap());
    }
}
