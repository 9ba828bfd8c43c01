//! Project archive packaging

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::linked_document;

/// Download name offered for the packaged project
pub const ARCHIVE_FILE_NAME: &str = "scratchpad-project.zip";

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Package the current buffers as a ZIP archive: a linked `index.html`
/// wrapper plus the raw stylesheet and script. Returns the archive bytes;
/// on failure nothing partial is offered.
pub fn write_archive(html: &str, css: &str, js: &str) -> Result<Vec<u8>, BundleError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("index.html", options)?;
    writer.write_all(linked_document(html).as_bytes())?;

    writer.start_file("style.css", options)?;
    writer.write_all(css.as_bytes())?;

    writer.start_file("script.js", options)?;
    writer.write_all(js.as_bytes())?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_archive_contains_the_three_entries() {
        let bytes = write_archive("<p>hi</p>", "p {}", "console.log(1);").unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"index.html"));
        assert!(names.contains(&"style.css"));
        assert!(names.contains(&"script.js"));
    }

    #[test]
    fn test_archive_entries_round_trip() {
        let bytes = write_archive("<p>hi</p>", "p { margin: 0; }", "console.log(1);").unwrap();

        assert_eq!(read_entry(&bytes, "style.css"), "p { margin: 0; }");
        assert_eq!(read_entry(&bytes, "script.js"), "console.log(1);");

        let index = read_entry(&bytes, "index.html");
        assert!(index.contains("<p>hi</p>"));
        assert!(index.contains("style.css"));
        assert!(index.contains("script.js"));
    }
}
