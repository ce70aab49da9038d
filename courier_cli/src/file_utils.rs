use std::path::{Path, PathBuf};

/// Files under `folder_path` with the given extension, recursively, sorted.
pub fn read_folder(folder_path: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let path = entry?.path();
        if path.is_file() {
            if path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        } else if path.is_dir() {
            files.extend(read_folder(&path, extension)?);
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_folder() {
        let current_dir = env::current_dir().unwrap();
        let folder_path = current_dir.join("tests/fixtures/read_folder");
        let files = read_folder(&folder_path, "json").unwrap();

        assert_eq!(
            files,
            vec![
                current_dir.join("tests/fixtures/read_folder/instance1.json"),
                current_dir.join("tests/fixtures/read_folder/subfolder1/instance2.json"),
                current_dir.join("tests/fixtures/read_folder/subfolder2/instance3.json"),
            ]
        );
    }
}
