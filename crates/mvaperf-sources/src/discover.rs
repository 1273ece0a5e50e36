use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mvaperf_core::Result;

/// Regular files in `dir` whose extension is `extension`, sorted by path.
///
/// A directory that does not exist is not an error: it is logged and
/// reported as `None` so the caller can skip the source.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Option<Vec<PathBuf>>> {
    let rd = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "score directory not found, skipping");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let want = extension.trim_start_matches('.');
    let mut out = Vec::new();
    for entry in rd {
        let entry = entry?;
        let ft = entry.file_type()?;
        if !ft.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some(want) {
            out.push(path);
        }
    }
    out.sort();
    tracing::debug!(dir = %dir.display(), n = out.len(), "discovered score files");
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        p.push(format!("mvaperf-sources-{}-{}-{}", name, std::process::id(), nanos));
        p
    }

    fn rm_rf(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[test]
    fn finds_sorted_matching_files() {
        let root = tmp_dir("disc1");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::write(root.join("BF_2x15_1K.csv"), "0.1\n").unwrap();
        std::fs::write(root.join("AF_2x15_1K.csv"), "0.1\n").unwrap();
        std::fs::write(root.join("notes.txt"), "x").unwrap();
        std::fs::write(root.join("nested/AF_5x15_1K.csv"), "0.1\n").unwrap();

        let found = discover_files(&root, ".csv").unwrap().unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("AF_2x15_1K.csv"));
        assert!(found[1].ends_with("BF_2x15_1K.csv"));

        rm_rf(&root);
    }

    #[test]
    fn missing_directory_is_soft() {
        let root = tmp_dir("disc-missing");
        assert!(discover_files(&root, "csv").unwrap().is_none());
    }
}
