//! Upload form state: the selected resume, the job description, and an
//! explicit two-state submission status.

use std::io;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Client-side size limit for the uploaded resume.
pub const MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// A file the user picked, inspected once at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedResume {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedResume {
    /// Stats the file behind `path`. Validation happens in [`ResumeForm::attach`].
    pub fn inspect(path: PathBuf) -> io::Result<Self> {
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        Ok(Self { path, name, size })
    }
}

/// Everything the transfer task needs for one submission.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub path: PathBuf,
    pub file_name: String,
    pub description: String,
}

/// The form controller. Transitions: Idle -> Submitting on a valid
/// [`try_submit`](Self::try_submit); Submitting -> Idle on completion.
#[derive(Debug, Default)]
pub struct ResumeForm {
    file: Option<SelectedResume>,
    pub description: String,
    status: SubmitStatus,
}

impl ResumeForm {
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn file(&self) -> Option<&SelectedResume> {
        self.file.as_ref()
    }

    /// Validates and stores a newly picked file. A rejected candidate leaves
    /// the current selection untouched.
    pub fn attach(&mut self, candidate: SelectedResume) -> Result<(), AppError> {
        if !is_pdf(&candidate.path) {
            return Err(AppError::NotPdf {
                name: candidate.name,
            });
        }
        if candidate.size > MAX_PDF_BYTES {
            return Err(AppError::FileTooLarge {
                size: candidate.size,
            });
        }
        self.file = Some(candidate);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Moves the form into Submitting and hands back the job to run, or
    /// refuses: silently for an in-flight submission, with a notice when a
    /// field is missing. No network work happens here.
    pub fn try_submit(&mut self) -> Result<UploadJob, AppError> {
        if self.status == SubmitStatus::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        let Some(file) = &self.file else {
            return Err(AppError::MissingFields);
        };
        if self.description.trim().is_empty() {
            return Err(AppError::MissingFields);
        }

        self.status = SubmitStatus::Submitting;
        Ok(UploadJob {
            path: file.path.clone(),
            file_name: file.name.clone(),
            description: self.description.clone(),
        })
    }

    /// The request succeeded: back to Idle with a blank form.
    pub fn complete_success(&mut self) {
        self.status = SubmitStatus::Idle;
        self.file = None;
        self.description.clear();
    }

    /// The request failed: back to Idle, inputs retained for a resubmit.
    pub fn complete_failure(&mut self) {
        self.status = SubmitStatus::Idle;
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
