#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub content: String,
}
