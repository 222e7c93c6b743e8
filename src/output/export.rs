// Matrix exports (CSV and Excel) and writing the run's output files.
//
// Everything is rendered in memory first. Files only hit disk once every
// output rendered cleanly, and writing is all-or-nothing: a failed run never
// leaves half a result set.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use tracing::{info, warn};

use super::report::render_report;
use super::{CSV_FILE, REPORT_FILE, XLSX_FILE};
use crate::error::AnalysisError;
use crate::scoring::Analysis;
use crate::similarity::matrix::SimilarityMatrix;

/// Shortest decimal form that round-trips, always with a fractional part
/// (`100.0`, `12.34`, `0.0`).
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// The matrix as CSV: a blank corner cell, then filenames across and down.
pub fn csv_bytes(matrix: &SimilarityMatrix) -> Result<Vec<u8>, AnalysisError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![String::new()];
    header.extend(matrix.labels().iter().cloned());
    writer.write_record(&header)?;

    for (label, row) in matrix.labels().iter().zip(matrix.rows()) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(|v| format_float(*v)));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| AnalysisError::Export(e.to_string()))
}

/// The matrix as a single-sheet workbook with the same layout as the CSV.
pub fn xlsx_bytes(matrix: &SimilarityMatrix) -> Result<Vec<u8>, AnalysisError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let worksheet = workbook.add_worksheet();

    let label_width = matrix
        .labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    worksheet.set_column_width(0, label_width.max(8) as f64)?;

    for (j, label) in matrix.labels().iter().enumerate() {
        worksheet.write_string_with_format(0, column(j + 1)?, label, &header)?;
    }

    for (i, (label, row)) in matrix.labels().iter().zip(matrix.rows()).enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string_with_format(r, 0, label, &header)?;
        for (j, value) in row.iter().enumerate() {
            worksheet.write_number(r, column(j + 1)?, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column(index: usize) -> Result<u16, AnalysisError> {
    u16::try_from(index)
        .map_err(|_| AnalysisError::Export(format!("{index} columns do not fit in a worksheet")))
}

/// All output files of a run, rendered and ready to write.
#[derive(Debug, Clone)]
pub struct RenderedOutputs {
    pub xlsx: Vec<u8>,
    pub csv: Vec<u8>,
    /// Absent when the report is switched off
    pub report: Option<String>,
}

impl RenderedOutputs {
    pub fn render(
        folder: &str,
        analysis: &Analysis,
        emit_report: bool,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            xlsx: xlsx_bytes(&analysis.matrix)?,
            csv: csv_bytes(&analysis.matrix)?,
            report: emit_report.then(|| render_report(folder, analysis)),
        })
    }

    /// Write every rendered file into `dir`, creating it if needed.
    ///
    /// Each file is staged as `<name>.tmp` and renamed into place only after
    /// every file was staged. On any failure the staged files and the ones
    /// already moved are removed, so `dir` never holds a partial result set.
    ///
    /// Returns the written paths in the order xlsx, csv, report.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            AnalysisError::Export(format!("cannot create {}: {e}", dir.display()))
        })?;

        let mut files: Vec<(&str, &[u8])> = vec![
            (XLSX_FILE, self.xlsx.as_slice()),
            (CSV_FILE, self.csv.as_slice()),
        ];
        if let Some(report) = &self.report {
            files.push((REPORT_FILE, report.as_bytes()));
        }

        let mut staged: Vec<(PathBuf, PathBuf, usize)> = Vec::with_capacity(files.len());
        for (name, bytes) in files {
            let path = dir.join(name);
            let tmp = dir.join(format!("{name}{STAGING_SUFFIX}"));
            if let Err(e) = std::fs::write(&tmp, bytes) {
                discard(staged.iter().map(|(tmp, _, _)| tmp.as_path()).chain([tmp.as_path()]));
                return Err(AnalysisError::Export(format!(
                    "cannot write {}: {e}",
                    path.display()
                )));
            }
            staged.push((tmp, path, bytes.len()));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (i, (tmp, path, bytes)) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(tmp, path) {
                warn!(path = %path.display(), error = %e, "Rolling back output files");
                discard(written.iter().map(PathBuf::as_path));
                discard(staged[i..].iter().map(|(tmp, _, _)| tmp.as_path()));
                return Err(AnalysisError::Export(format!(
                    "cannot write {}: {e}",
                    path.display()
                )));
            }
            info!(path = %path.display(), bytes = *bytes, "Wrote output file");
            written.push(path.clone());
        }

        Ok(written)
    }
}

/// Suffix of a file written but not yet moved into place.
const STAGING_SUFFIX: &str = ".tmp";

/// Best-effort removal; a path that never got created is fine.
fn discard<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Could not remove output file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_scores(
            vec!["a.pptx".into(), "b, c.pptx".into()],
            vec![vec![100.0, 12.34], vec![12.34, 100.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(100.0), "100.0");
        assert_eq!(format_float(12.34), "12.34");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(70.71), "70.71");
    }

    #[test]
    fn test_csv_layout() {
        let csv = String::from_utf8(csv_bytes(&matrix()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], r#",a.pptx,"b, c.pptx""#);
        assert_eq!(lines[1], "a.pptx,100.0,12.34");
        assert_eq!(lines[2], r#""b, c.pptx",12.34,100.0"#);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_xlsx_is_a_zip_package() {
        let bytes = xlsx_bytes(&matrix()).unwrap();
        // Office Open XML packages are ZIP archives ("PK" magic)
        assert_eq!(&bytes[..2], b"PK");
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert!(archive.file_names().any(|n| n == "xl/worksheets/sheet1.xml"));
    }

    #[test]
    fn test_write_to_skips_report_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = Analysis::from_matrix(matrix());

        let outputs = RenderedOutputs::render("in", &analysis, false).unwrap();
        let written = outputs.write_to(dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join(XLSX_FILE).exists());
        assert!(dir.path().join(CSV_FILE).exists());
        assert!(!dir.path().join(REPORT_FILE).exists());
    }

    #[test]
    fn test_write_to_rolls_back_when_a_file_cannot_be_written() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the csv name makes that file unwritable
        std::fs::create_dir(dir.path().join(CSV_FILE)).unwrap();
        let analysis = Analysis::from_matrix(matrix());

        let outputs = RenderedOutputs::render("in", &analysis, true).unwrap();
        let err = outputs.write_to(dir.path()).unwrap_err();

        assert!(matches!(err, AnalysisError::Export(_)), "got {err:?}");
        let left: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(left, vec![CSV_FILE.to_string()]);
    }

    #[test]
    fn test_write_to_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results").join("ch1");
        let analysis = Analysis::from_matrix(matrix());

        let outputs = RenderedOutputs::render("in", &analysis, true).unwrap();
        let written = outputs.write_to(&out).unwrap();

        assert_eq!(
            written,
            vec![out.join(XLSX_FILE), out.join(CSV_FILE), out.join(REPORT_FILE)]
        );
        let report = std::fs::read_to_string(out.join(REPORT_FILE)).unwrap();
        assert!(report.starts_with("DETAILED SIMILARITY REPORT FOR PPTX FILES\n"));
    }
}
