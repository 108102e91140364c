//! CSR provider and GET response body.

use std::path::Path;

/// Read the CSR text, dropping one trailing newline.
///
/// A missing or unreadable file yields an empty CSR; the GET exchange still
/// gets answered.
pub async fn read_csr(path: &Path) -> String {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read CSR file, serving empty value");
            return String::new();
        }
    };

    let mut csr = String::from_utf8_lossy(&bytes).into_owned();
    if csr.ends_with('\n') {
        csr.pop();
    }
    csr
}

/// Body of the GET response: `{"csr": "<value>"}`.
///
/// The value is JSON-escaped, so quotes and line breaks inside the CSR
/// still produce a valid document.
pub fn csr_document(csr: &str) -> String {
    let value = serde_json::Value::String(csr.to_owned());
    format!("{{\"csr\": {}}}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn strips_single_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "MIIBcsr\n\n").unwrap();
        assert_eq!(read_csr(file.path()).await, "MIIBcsr\n");
    }

    #[tokio::test]
    async fn keeps_value_without_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "MIIBcsr").unwrap();
        assert_eq!(read_csr(file.path()).await, "MIIBcsr");
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_csr(&dir.path().join("csr.txt")).await, "");
    }

    #[test]
    fn document_shape() {
        assert_eq!(csr_document("abc"), r#"{"csr": "abc"}"#);
        assert_eq!(csr_document(""), r#"{"csr": ""}"#);
    }

    #[test]
    fn document_escapes_pem_text() {
        let pem = "-----BEGIN CERTIFICATE REQUEST-----\nMIIB\"x\n-----END CERTIFICATE REQUEST-----";
        let doc = csr_document(pem);
        let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed["csr"], pem);
    }
}
