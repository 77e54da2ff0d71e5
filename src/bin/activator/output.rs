use activation_rs::RunReport;
use std::io::Write;
use std::path::Path;

/// Write a JSON document to stdout or a file.
pub fn write_output(json: &str, output_path: Option<&str>) -> Result<(), String> {
    match output_path {
        Some(path) => std::fs::write(Path::new(path), format!("{}\n", json))
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let mut handle = std::io::stdout().lock();
            writeln!(handle, "{}", json).map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Write the run report to `path`, if one was requested.
pub fn write_report(report: &RunReport, path: Option<&str>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };
    write_output(&to_json(report)?, Some(path))
}
