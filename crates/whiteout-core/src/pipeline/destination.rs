//! Output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::pipeline::encode::OUTPUT_EXTENSION;
use crate::types::FileTask;

/// Maps source images to destination paths.
///
/// The output name is always `<stem><suffix>.png`. With `keep_subdirs`, the
/// source's directory relative to the input root is recreated under the
/// output root; otherwise every output lands directly in the output root.
#[derive(Debug, Clone)]
pub struct DestinationPlanner {
    input_dir: PathBuf,
    output_dir: PathBuf,
    suffix: String,
    keep_subdirs: bool,
}

impl DestinationPlanner {
    pub fn new(input_dir: &Path, output_dir: &Path, suffix: &str, keep_subdirs: bool) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            suffix: suffix.to_string(),
            keep_subdirs,
        }
    }

    /// Compute the destination for one source file.
    pub fn destination(&self, source: &Path) -> PathBuf {
        let mut file_name = OsString::from(source.file_stem().unwrap_or_default());
        file_name.push(&self.suffix);
        file_name.push(".");
        file_name.push(OUTPUT_EXTENSION);

        if self.keep_subdirs {
            let relative_parent = source
                .parent()
                .and_then(|parent| parent.strip_prefix(&self.input_dir).ok())
                .unwrap_or_else(|| Path::new(""));
            self.output_dir.join(relative_parent).join(file_name)
        } else {
            self.output_dir.join(file_name)
        }
    }

    /// Pair a source file with its destination.
    pub fn plan(&self, source: PathBuf) -> FileTask {
        let destination = self.destination(&source);
        FileTask {
            source,
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_destination() {
        let planner = DestinationPlanner::new(
            Path::new("/in"),
            Path::new("/out"),
            "_transparent",
            false,
        );
        assert_eq!(
            planner.destination(Path::new("/in/a/b/img.jpeg")),
            PathBuf::from("/out/img_transparent.png")
        );
    }

    #[test]
    fn test_mirrored_destination() {
        let planner = DestinationPlanner::new(
            Path::new("/in"),
            Path::new("/out"),
            "_transparent",
            true,
        );
        assert_eq!(
            planner.destination(Path::new("/in/a/b/img.png")),
            PathBuf::from("/out/a/b/img_transparent.png")
        );
        assert_eq!(
            planner.destination(Path::new("/in/top.webp")),
            PathBuf::from("/out/top_transparent.png")
        );
    }

    #[test]
    fn test_empty_suffix_and_dotted_stem() {
        let planner = DestinationPlanner::new(Path::new("/in"), Path::new("/in"), "", false);
        assert_eq!(
            planner.destination(Path::new("/in/logo.v2.JPG")),
            PathBuf::from("/in/logo.v2.png")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_stem_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let planner = DestinationPlanner::new(Path::new("/in"), Path::new("/out"), "_t", false);
        let source = Path::new("/in").join(std::ffi::OsStr::from_bytes(b"caf\xe9.jpg"));
        let dest = planner.destination(&source);
        assert_eq!(dest.file_name().unwrap().as_bytes(), b"caf\xe9_t.png");
    }

    #[test]
    fn test_plan_pairs_paths() {
        let planner = DestinationPlanner::new(Path::new("/in"), Path::new("/out"), "_x", false);
        let task = planner.plan(PathBuf::from("/in/a.png"));
        assert_eq!(task.source, PathBuf::from("/in/a.png"));
        assert_eq!(task.destination, PathBuf::from("/out/a_x.png"));
    }
}
