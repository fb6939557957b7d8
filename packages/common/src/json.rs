use crate::{CommonResult, FileSystem};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and deserialize a JSON file through a [`FileSystem`]
pub fn read_json<T: DeserializeOwned>(fs: &dyn FileSystem, path: &Path) -> CommonResult<T> {
    let content = fs.read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value as pretty JSON and write it through a [`FileSystem`]
pub fn write_json<T: Serialize>(fs: &dyn FileSystem, path: &Path, value: &T) -> CommonResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs.write(path, &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonError, MockFileSystem};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn test_write_then_read() {
        let fs = MockFileSystem::new();
        let mut value = BTreeMap::new();
        value.insert("id".to_string(), "doc-1".to_string());

        write_json(&fs, Path::new("doc.json"), &value).expect("Failed to write");
        let back: BTreeMap<String, String> =
            read_json(&fs, Path::new("doc.json")).expect("Failed to read");
        assert_eq!(back, value);
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let mut fs = MockFileSystem::new();
        fs.add_file(PathBuf::from("bad.json"), "{ not json");

        let result: CommonResult<BTreeMap<String, String>> =
            read_json(&fs, Path::new("bad.json"));
        assert!(matches!(result, Err(CommonError::Json(_))));
    }
}
