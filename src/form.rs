//! The compose form: what to send to the generation endpoint.

use std::path::PathBuf;

use crate::backend::{ExamParameters, GenerationRequest};
use crate::error::ValidationError;
use crate::models::Mode;

pub const DEFAULT_FILE_TYPE: &str = "book";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Prompt,
    Mode,
    File,
    FileType,
    ExamDays,
    Syllabus,
    StudyHours,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Prompt => "Prompt",
            FormField::Mode => "Mode",
            FormField::File => "File",
            FormField::FileType => "File type",
            FormField::ExamDays => "Exam in (days)",
            FormField::Syllabus => "Syllabus",
            FormField::StudyHours => "Study hours/day",
        }
    }
}

const BASE_FIELDS: [FormField; 4] = [
    FormField::Prompt,
    FormField::Mode,
    FormField::File,
    FormField::FileType,
];
const EXAM_FIELDS: [FormField; 3] = [
    FormField::ExamDays,
    FormField::Syllabus,
    FormField::StudyHours,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptForm {
    pub prompt: String,
    pub mode: Mode,
    pub file: String,
    pub file_type: String,
    pub exam_days: String,
    pub syllabus: String,
    pub study_hours: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl Default for PromptForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            mode: Mode::Summarize,
            file: String::new(),
            file_type: DEFAULT_FILE_TYPE.to_string(),
            exam_days: String::new(),
            syllabus: String::new(),
            study_hours: String::new(),
            focus: FormField::Prompt,
            error: None,
        }
    }
}

impl PromptForm {
    /// Fields shown for the current mode. Exam fields only apply to exam prep.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = BASE_FIELDS.to_vec();
        if self.mode == Mode::ExamPrep {
            fields.extend(EXAM_FIELDS);
        }
        fields
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        let count = self.visible_fields().len();
        self.move_focus(count - 1);
    }

    fn move_focus(&mut self, by: usize) {
        let fields = self.visible_fields();
        let position = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = fields[(position + by) % fields.len()];
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        self.mode = if forward {
            self.mode.next()
        } else {
            self.mode.previous()
        };
        if !self.visible_fields().contains(&self.focus) {
            self.focus = FormField::Mode;
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Prompt => &self.prompt,
            FormField::Mode => self.mode.wire_name(),
            FormField::File => &self.file,
            FormField::FileType => &self.file_type,
            FormField::ExamDays => &self.exam_days,
            FormField::Syllabus => &self.syllabus,
            FormField::StudyHours => &self.study_hours,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Prompt => Some(&mut self.prompt),
            FormField::Mode => None,
            FormField::File => Some(&mut self.file),
            FormField::FileType => Some(&mut self.file_type),
            FormField::ExamDays => Some(&mut self.exam_days),
            FormField::Syllabus => Some(&mut self.syllabus),
            FormField::StudyHours => Some(&mut self.study_hours),
        }
    }

    pub fn push(&mut self, c: char) {
        self.error = None;
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.error = None;
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Restores prompt and mode from a history entry.
    pub fn restore(&mut self, prompt: &str, mode: &Mode) {
        self.prompt = prompt.to_string();
        self.mode = mode.clone();
        self.error = None;
    }

    pub fn to_request(&self) -> Result<GenerationRequest, ValidationError> {
        let file = self.file.trim();
        if self.prompt.trim().is_empty() && file.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        let file_type = match self.file_type.trim() {
            "" => DEFAULT_FILE_TYPE.to_string(),
            other => other.to_string(),
        };

        Ok(GenerationRequest {
            prompt: self.prompt.clone(),
            mode: self.mode.clone(),
            file_type,
            file: (!file.is_empty()).then(|| PathBuf::from(file)),
            exam: (self.mode == Mode::ExamPrep).then(|| ExamParameters {
                exam_days: self.exam_days.trim().to_string(),
                syllabus: self.syllabus.trim().to_string(),
                study_hours: self.study_hours.trim().to_string(),
            }),
        })
    }
}
