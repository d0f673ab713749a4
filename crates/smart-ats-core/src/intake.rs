//! Upload form state: the attached resume, the optional job description
//! and the drop-zone highlight.
//!
//! Validity depends on the attachment alone; the job description never gates
//! submission. File type and size are left for the backend to judge.

use std::path::{Path, PathBuf};

/// A resume chosen through the picker or dropped onto the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub name: String,
}

impl Attachment {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, name }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    attachment: Option<Attachment>,
    pub job_description: String,
    drag_over: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the first of the selected files; an empty selection clears it.
    pub fn select_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.attachment = files.into_iter().next().map(Attachment::new);
    }

    /// A drag entered the drop zone.
    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    /// The drag left the drop zone without dropping.
    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Files were dropped: clear the highlight and treat them as picked.
    /// A drop with no files keeps the current attachment.
    pub fn drop_files(&mut self, files: Vec<PathBuf>) {
        self.drag_over = false;
        if !files.is_empty() {
            self.select_files(files);
        }
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Whether the form may be submitted.
    pub fn is_valid(&self) -> bool {
        self.attachment.is_some()
    }

    /// `Attached: <name>`, or `None` when nothing is attached.
    pub fn attachment_label(&self) -> Option<String> {
        self.attachment
            .as_ref()
            .map(|a| format!("Attached: {}", a.name))
    }

    /// Trimmed job description as sent to the backend.
    pub fn trimmed_job_description(&self) -> &str {
        self.job_description.trim()
    }

    /// Back to the empty, invalid state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Interpret pasted terminal text as dropped files.
///
/// Terminals deliver a file dragged onto the window as its path, sometimes
/// quoted, `file://`-prefixed or with escaped spaces; several files arrive
/// separated by newlines. Returns the paths only if every entry names an
/// existing file, so ordinary pasted text is left alone.
pub fn dropped_paths(text: &str) -> Option<Vec<PathBuf>> {
    let entries: Vec<PathBuf> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(clean_dropped_path)
        .collect();

    if entries.is_empty() || !entries.iter().all(|p| p.is_file()) {
        return None;
    }
    Some(entries)
}

fn clean_dropped_path(raw: &str) -> PathBuf {
    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(raw);
    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    PathBuf::from(without_scheme.replace("\\ ", " "))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    Path::new(input).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn only_the_attachment_gates_validity() {
        let mut form = UploadForm::new();
        form.job_description = "Senior Rust engineer".to_string();
        assert!(!form.is_valid());
        assert_eq!(form.attachment_label(), None);

        form.select_files(vec![PathBuf::from("/tmp/cv.pdf")]);
        assert!(form.is_valid());
        assert_eq!(form.attachment_label().as_deref(), Some("Attached: cv.pdf"));

        form.job_description.clear();
        assert!(form.is_valid());
    }

    #[test]
    fn empty_selection_clears_attachment() {
        let mut form = UploadForm::new();
        form.select_files(vec![PathBuf::from("/tmp/cv.pdf")]);
        form.select_files(Vec::new());
        assert!(!form.is_valid());
        assert_eq!(form.attachment_label(), None);
    }

    #[test]
    fn drop_adopts_first_file_and_clears_highlight() {
        let mut form = UploadForm::new();
        form.drag_enter();
        assert!(form.is_drag_over());

        form.drop_files(vec![PathBuf::from("/a/first.docx"), PathBuf::from("/a/second.pdf")]);
        assert!(!form.is_drag_over());
        assert_eq!(form.attachment().unwrap().name, "first.docx");
    }

    #[test]
    fn drag_leave_keeps_attachment() {
        let mut form = UploadForm::new();
        form.select_files(vec![PathBuf::from("/a/cv.pdf")]);
        form.drag_enter();
        form.drag_leave();
        form.drop_files(Vec::new());
        assert!(!form.is_drag_over());
        assert!(form.is_valid());
    }

    #[test]
    fn reset_returns_to_empty_invalid_state() {
        let mut form = UploadForm::new();
        form.select_files(vec![PathBuf::from("/a/cv.pdf")]);
        form.job_description = "Data engineer".to_string();
        form.drag_enter();
        form.reset();
        assert_eq!(form, UploadForm::new());
        assert!(!form.is_valid());
    }

    #[test]
    fn dropped_paths_accepts_existing_files_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resume").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let quoted = format!("'{path}'");
        assert_eq!(dropped_paths(&quoted), Some(vec![PathBuf::from(&path)]));

        let with_scheme = format!("file://{path}\n");
        assert_eq!(dropped_paths(&with_scheme), Some(vec![PathBuf::from(&path)]));

        assert_eq!(dropped_paths("just some pasted words"), None);
        assert_eq!(dropped_paths(&format!("{path}\n/definitely/not/here.pdf")), None);
        assert_eq!(dropped_paths("   "), None);
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/srv/cv.pdf"), PathBuf::from("/srv/cv.pdf"));
    }
}
