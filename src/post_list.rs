use std::path::PathBuf;
use std::{fs, io};

/// Lists markdown post files in the posts directory. The directory is flat:
/// one file per (slug, language), e.g. hello-world.ja.md next to
/// hello-world.en.md
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(file_name) = file_name.to_str() {
                if file_name.ends_with(".md") && !file_name.starts_with('.') {
                    posts.push(entry.path());
                }
            }
        }
        posts.sort();
        Ok(posts)
    }
}
