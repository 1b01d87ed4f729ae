use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Write `lines_count` lines of random words to `dir/name`, joined without a trailing newline.
pub fn write_generated_lines(dir: &Path, name: &str, lines_count: usize) -> FileSpec {
    use fake::{Fake, faker::lorem::en::Words};

    let content = (0..lines_count)
        .map(|_| Words(3..6).fake::<Vec<String>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");

    let file_spec = FileSpec::new(dir.join(name), content);
    write_file(file_spec.clone());

    file_spec
}
