use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub fn collect_fixture_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| is_fixture_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_fixture_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "msghist")
}
