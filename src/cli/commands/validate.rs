//! Validate a submission without touching the board

use anyhow::bail;

use kanban::board::{DESCRIPTION_FIELD, PEOPLE_FIELD, TITLE_FIELD};
use kanban::config::BoardConfig;
use kanban::core::services::FieldInput;
use kanban::output::{OutputMode, ValidationView};

/// Field values given on the command line
#[derive(Debug, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub people: Option<String>,
    pub fields: Vec<String>,
}

impl Submission {
    fn into_input(self) -> anyhow::Result<FieldInput> {
        let mut input = FieldInput::new();
        for (name, value) in [
            (TITLE_FIELD, self.title),
            (DESCRIPTION_FIELD, self.description),
            (PEOPLE_FIELD, self.people),
        ] {
            if let Some(value) = value {
                input.insert(name.to_string(), value);
            }
        }
        for field in self.fields {
            let Some((key, value)) = field.split_once('=') else {
                bail!("expected key=value, got `{field}`");
            };
            input.insert(key.to_string(), value.to_string());
        }
        Ok(input)
    }
}

/// Evaluate the submission against the form schema (exits 1 when invalid)
pub fn validate(config: &BoardConfig, submission: Submission, mode: OutputMode) -> anyhow::Result<()> {
    let registry = config.build_registry()?;
    let report = registry.evaluate(&config.form.schema, &submission.into_input()?);

    ValidationView::from(&report).render(mode);

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}
