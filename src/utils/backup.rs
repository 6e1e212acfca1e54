use crate::utils::error::Result;
use std::io::{Cursor, Read, Write};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Packs `(name, bytes)` pairs into an in-memory zip archive.
pub fn build_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, data) in entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Reads every entry back, in archive order.
pub fn read_archive(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        entries.push((file.name().to_string(), data));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_keeps_names_and_bytes() {
        let entries = vec![
            ("a.json".to_string(), b"{\"amplitudes\": [1, 2]}".to_vec()),
            ("b.json".to_string(), Vec::new()),
        ];

        let archive = build_archive(&entries).unwrap();

        assert_eq!(read_archive(&archive).unwrap(), entries);
    }

    #[test]
    fn test_empty_archive() {
        let archive = build_archive(&[]).unwrap();
        assert!(read_archive(&archive).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_zip_error() {
        let err = read_archive(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, crate::utils::error::EtlError::ZipError(_)));
    }
}
