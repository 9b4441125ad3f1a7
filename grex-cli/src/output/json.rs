//! JSON output formatting for machine-readable output.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as JSON string
    ///
    /// Uses pretty-printing by default. When `config.compact` is true,
    /// outputs minified JSON on a single line.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[derive(Serialize)]
    struct TestData {
        id: String,
        complete: bool,
    }

    #[test]
    fn test_format_pretty() {
        let data = TestData {
            id: "v1".to_string(),
            complete: true,
        };
        let config = OutputConfig::new(OutputFormat::Json);
        let output = JsonOutput::format(&data, &config);

        assert!(output.contains("\"id\""));
        assert!(output.contains("\"v1\""));
        assert!(output.contains("\n"));
    }

    #[test]
    fn test_format_compact() {
        let data = TestData {
            id: "v1".to_string(),
            complete: false,
        };
        let mut config = OutputConfig::new(OutputFormat::Json);
        config.compact = true;
        let output = JsonOutput::format(&data, &config);

        assert_eq!(output, r#"{"id":"v1","complete":false}"#);
    }
}
