use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(spec: FileSpec) {
    std::fs::write(&spec.path, &spec.content).expect("Failed to write fixture file");
}

/// Generate `files_count` flat files with fake names and content
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::Fake;
    use fake::faker::lorem::en::{Word, Words};

    let mut specs = Vec::new();
    for index in 0..files_count {
        let file_name = format!("{}_{}.txt", Word().fake::<String>(), index);
        let content = Words(5..10).fake::<Vec<String>>().join(" ");
        let spec = FileSpec::new(dir.join(file_name), content);
        write_file(spec.clone());
        specs.push(spec);
    }
    specs
}
