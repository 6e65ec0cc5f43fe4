use std::fs;
use std::path::Path;
use crate::config::constants::JAVA_FILE_EXTENSION;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::file_info::FileInfo;

// Build output and VCS metadata never hold analyzable sources
const SKIPPED_DIRECTORIES: &[&str] = &[".git", ".idea", "target", "build", "out", "node_modules"];

pub struct RepoScanner {
    repo_path: String,
}

impl RepoScanner {
    pub fn new(repo_path: String) -> Self {
        Self { repo_path }
    }

    /// Collect every Java source file under the repository root, with paths
    /// relative to the root.
    pub fn scan_java_files(&self) -> MigralyzerResult<Vec<FileInfo>> {
        let root = Path::new(&self.repo_path);
        if !root.is_dir() {
            return Err(MigralyzerError::repo_error(
                &self.repo_path,
                "scan",
                "Repository path does not exist or is not a directory",
            ));
        }

        let mut files = Vec::new();
        self.collect_files(root, root, &mut files)?;
        Ok(files)
    }

    fn collect_files(&self, dir: &Path, repo_root: &Path, files: &mut Vec<FileInfo>) -> MigralyzerResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| {
            MigralyzerError::repo_error(&self.repo_path, "read_dir", &e.to_string())
        })?;

        for entry in entries.flatten() {
            let path = entry.path();

            if path.is_dir() {
                if Self::should_skip_dir(&path) {
                    continue;
                }
                self.collect_files(&path, repo_root, files)?;
            } else if Self::is_java_file(&path) {
                match fs::read_to_string(&path) {
                    Ok(content) => {
                        let relative = path
                            .strip_prefix(repo_root)
                            .unwrap_or(&path)
                            .to_string_lossy()
                            .to_string();
                        files.push(FileInfo { path: relative, content });
                    }
                    Err(e) => {
                        log::warn!("⚠️ Skipping unreadable file {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(())
    }

    fn should_skip_dir(path: &Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        SKIPPED_DIRECTORIES.contains(&name.as_ref()) || name.starts_with('.')
    }

    fn is_java_file(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == JAVA_FILE_EXTENSION)
            .unwrap_or(false)
    }
}
