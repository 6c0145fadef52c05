//! OPC package access: the ZIP container that holds the deck's XML parts.

use deck_core::{Error, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

/// An in-memory PPTX package.
///
/// The original archive bytes are kept so that every part we do not touch can
/// be copied into the output without being recompressed.
pub struct Package {
    bytes: Vec<u8>,
    part_names: Vec<String>,
}

impl Package {
    /// Open a package from the raw bytes of a `.pptx` file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice()))
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut part_names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive
                .by_index_raw(index)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", index, e)))?;
            part_names.push(file.name().to_string());
        }
        drop(archive);

        Ok(Self { bytes, part_names })
    }

    /// Names of all entries, in archive order.
    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    /// Whether the package has an entry with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.part_names.iter().any(|n| n == name)
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&self, name: &str) -> Result<String> {
        let mut archive = self.archive()?;
        let mut file = archive
            .by_name(name)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", name, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;

        Ok(content)
    }

    /// Serialize the package, substituting the given parts.
    ///
    /// Entries keep their order and compression method. Entries without a
    /// replacement are copied raw.
    pub fn write_with(&self, replacements: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(self.bytes.len())));

        for (index, name) in self.part_names.iter().enumerate() {
            match replacements.get(name) {
                Some(content) => {
                    let options = {
                        let original = archive.by_index_raw(index).map_err(|e| {
                            Error::ZipError(format!("Failed to read '{}': {}", name, e))
                        })?;
                        FileOptions::default()
                            .compression_method(original.compression())
                            .last_modified_time(original.last_modified())
                    };

                    log::debug!("Writing modified part {}", name);
                    writer
                        .start_file(name.as_str(), options)
                        .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
                    writer
                        .write_all(content)
                        .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
                }
                None => {
                    let file = archive.by_index_raw(index).map_err(|e| {
                        Error::ZipError(format!("Failed to read '{}': {}", name, e))
                    })?;
                    writer
                        .raw_copy_file(file)
                        .map_err(|e| Error::ZipError(format!("Failed to copy '{}': {}", name, e)))?;
                }
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish ZIP: {}", e)))?;

        Ok(cursor.into_inner())
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::CompressionMethod;

    fn sample_zip() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file("a.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<a/>").unwrap();
        writer.start_file("media/image1.png", stored).unwrap();
        writer.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_part_and_names() {
        let package = Package::from_bytes(sample_zip()).unwrap();
        assert_eq!(package.part_names(), &["a.xml", "media/image1.png"]);
        assert!(package.contains("a.xml"));
        assert!(!package.contains("b.xml"));
        assert_eq!(package.read_part("a.xml").unwrap(), "<a/>");
        assert!(matches!(package.read_part("b.xml"), Err(Error::ZipError(_))));
    }

    #[test]
    fn test_write_with_replaces_only_named_parts() {
        let package = Package::from_bytes(sample_zip()).unwrap();
        let mut replacements = BTreeMap::new();
        replacements.insert("a.xml".to_string(), b"<b/>".to_vec());

        let out = Package::from_bytes(package.write_with(&replacements).unwrap()).unwrap();
        assert_eq!(out.part_names(), package.part_names());
        assert_eq!(out.read_part("a.xml").unwrap(), "<b/>");

        let mut archive = out.archive().unwrap();
        let mut image = archive.by_name("media/image1.png").unwrap();
        assert_eq!(image.compression(), CompressionMethod::Stored);
        let mut bytes = Vec::new();
        image.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(matches!(
            Package::from_bytes(b"not a zip file".to_vec()),
            Err(Error::ZipError(_))
        ));
    }
}
