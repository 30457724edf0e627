//! Job file
//!
//! A job names the grids to export and the settings for each format:
//!
//! ```json
//! {
//!   "grids": [{ "name": "Pipes", "columns": ["Id", "Size"], "rows": [["1", "DN50"]] }],
//!   "pageSetup": { "paper": "a4", "landscape": false },
//!   "pdf": { "title": "Pipes" },
//!   "xlsx": { "printTitles": true }
//! }
//! ```

use anyhow::{bail, Context, Result};
use export::{PdfExportOptions, XlsxExportOptions};
use grid_model::{Grid, PageSetup};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFile {
    pub grids: Vec<Grid>,
    #[serde(default)]
    pub page_setup: PageSetup,
    #[serde(default)]
    pub pdf: PdfExportOptions,
    #[serde(default)]
    pub xlsx: XlsxExportOptions,
}

impl JobFile {
    pub fn from_json(json: &str) -> Result<Self> {
        let job: JobFile = serde_json::from_str(json).context("malformed job file")?;
        job.validate()?;
        Ok(job)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read job file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.grids.is_empty() {
            bail!("job file lists no grids");
        }
        for grid in &self.grids {
            grid.validate()
                .with_context(|| format!("grid {:?}", grid.name))?;
        }
        self.page_setup.validate().context("page setup")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_model::PaperKind;

    #[test]
    fn test_minimal_job_uses_defaults() {
        let job = JobFile::from_json(r#"{"grids":[{"name":"Pipes","columns":["Id"]}]}"#).unwrap();
        assert_eq!(job.grids.len(), 1);
        assert_eq!(job.page_setup, PageSetup::default());
        assert_eq!(job.pdf.language, "en-US");
        assert!(job.xlsx.print_titles);
    }

    #[test]
    fn test_full_job() {
        let json = r#"{
            "grids": [{"name": "Pipes", "columns": ["Id", "Size"], "rows": [["1", null]]}],
            "pageSetup": {"paper": "letter", "landscape": true, "margins": {"left": 50, "right": 50, "top": 40, "bottom": 40}},
            "pdf": {"title": "Pipe list", "author": "Ops"},
            "xlsx": {"deviceName": "Office Printer", "printTitles": false}
        }"#;
        let job = JobFile::from_json(json).unwrap();
        assert_eq!(job.page_setup.paper, PaperKind::Letter);
        assert!(job.page_setup.landscape);
        assert_eq!(job.page_setup.margins.top, 40);
        assert_eq!(job.pdf.title.as_deref(), Some("Pipe list"));
        assert_eq!(job.xlsx.device_name, "Office Printer");
        assert_eq!(job.grids[0].rows[0][1], None);
    }

    #[test]
    fn test_rejects_empty_job() {
        assert!(JobFile::from_json(r#"{"grids":[]}"#).is_err());
        assert!(JobFile::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(&path, r#"{"grids":[{"name":"A","columns":["x"]}]}"#).unwrap();
        assert_eq!(JobFile::load(&path).unwrap().grids[0].name, "A");
        assert!(JobFile::load(&dir.path().join("missing.json")).is_err());
    }
}
