//! Report accumulator
//! Every line shown to the user during a session, flushed verbatim on demand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed name of the exported report inside the results directory.
pub const REPORT_FILE_NAME: &str = "Pesquisa realizada.txt";

/// Append-only log of report lines, in the order they were shown.
#[derive(Debug, Default, Clone)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Write every line followed by `\n` as UTF-8, replacing any existing file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_lines_in_order_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);

        let mut report = Report::new();
        report.push("Temperatura média: 15.0 °C");
        report.push("");
        report.push(String::from("PM2.5: 10.0 µg/m³"));
        report.save(&path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, "Temperatura média: 15.0 °C\n\nPM2.5: 10.0 µg/m³\n");

        report.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }
}
