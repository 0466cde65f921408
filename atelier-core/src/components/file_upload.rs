use serde::{Deserialize, Serialize};

/// A file picked by the user, before it is turned into a photo or
/// attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: &str, mime_type: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub accepted: Vec<SelectedFile>,
    /// One message per rejected file
    pub rejected: Vec<String>,
}

/// Drop zone accepting files whose MIME type matches `accept`, a comma
/// separated list of exact types or `type/*` wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub accept: String,
    pub multiple: bool,
}

impl Default for FileUpload {
    fn default() -> Self {
        Self {
            accept: "image/*".to_string(),
            multiple: true,
        }
    }
}

impl FileUpload {
    pub fn accepting(accept: &str) -> Self {
        Self {
            accept: accept.to_string(),
            ..Self::default()
        }
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        self.accept
            .split(',')
            .map(|pattern| pattern.trim().to_ascii_lowercase())
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| match pattern.strip_suffix("/*") {
                Some(prefix) if prefix == "*" => true,
                Some(prefix) => mime_type
                    .strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/')),
                None => pattern == mime_type,
            })
    }

    fn rejection(&self, file: &SelectedFile) -> String {
        if self.accept.contains("image/") {
            format!("{} is not a valid image file", file.name)
        } else {
            format!("{} is not an accepted file type", file.name)
        }
    }

    pub fn select(&self, files: Vec<SelectedFile>) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();
        for file in files {
            if self.accepts(&file.mime_type) {
                outcome.accepted.push(file);
            } else {
                outcome.rejected.push(self.rejection(&file));
            }
        }
        if !self.multiple {
            outcome.accepted.truncate(1);
        }
        outcome
    }
}
