//! Materializes a returned resume as a file in the user's downloads directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::transfer::OptimizedResume;

/// Writes the optimized resume to the downloads directory and returns the
/// final path. Name collisions get a ` (N)` suffix instead of overwriting.
pub fn save_to_downloads(resume: &OptimizedResume) -> io::Result<PathBuf> {
    save_into(&target_dir(), resume)
}

pub fn save_into(dir: &Path, resume: &OptimizedResume) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = unique_destination(dir, &resume.file_name);
    fs::write(&path, &resume.bytes)?;
    Ok(path)
}

fn target_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let first = dir.join(file_name);
    if !first.exists() {
        return first;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    for n in 1.. {
        let candidate = match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        };
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("ran out of candidate names")
}
