// Pipeline orchestration: list, extract, score, report.

pub mod analyze;
