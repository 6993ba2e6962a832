use super::{StatementEngine, DEFAULT_RESOLUTION_HINT};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::models::{AccountInfo, RawTable};
use crate::pipeline::PipelineError;
use crate::profiles::{BankProfile, ProfileRegistry};
use crate::source::{CsvTableSource, OcrTextSource, SidecarOcrSource, SourceError, TableSource};

const STATEMENT: &str = "\
Canara Bank statement,,,,,
Txn Date,Narration,Debit,Credit,Balance
02-04-2024,Rent,200.00,,800.00
03-04-2024,Salary,,500.00,\"1,300.00\"
";

fn canara() -> Result<Arc<BankProfile>> {
    Ok(ProfileRegistry::builtin().resolve("canara")?)
}

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

struct RecordingOcr {
    hints: Mutex<Vec<u32>>
}

impl OcrTextSource for RecordingOcr {
    fn first_page_text(&self, _document: &Path, resolution_hint: u32) -> Option<String> {
        self.hints.lock().unwrap().push(resolution_hint);
        Some("Account Holder Name: ASHA RAO\nAccount Number: 998877".to_string())
    }
}

struct ExplodingSource;

impl TableSource for ExplodingSource {
    fn tables(&self, document: &Path) -> Result<Vec<RawTable>, SourceError> {
        if document.ends_with("boom.csv") {
            panic!("table engine crashed");
        }

        Ok(vec![vec![
            vec!["Txn Date".to_string(), "Narration".to_string(), "Balance".to_string()],
            vec!["01-04-2024".to_string(), "Deposit".to_string(), "10.00".to_string()]
        ]])
    }
}

#[test]
fn test_engine_runs_statement_end_to_end() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("april.csv");
    fs::write(&path, STATEMENT)?;
    fs::write(directory.path().join("april.txt"), "Account Holder's Name: RAVI KUMAR\nAccount Number: 1234")?;

    let report = StatementEngine::new(canara()?).run(&path)?;

    assert_eq!(report.bank, "Canara Bank");
    assert_eq!(report.document, path);
    assert_eq!(report.ledger.len(), 2);
    assert_eq!(report.ledger.rows[0].description, "Rent");
    assert_eq!(report.metrics.total_debit, decimal("200.00"));
    assert_eq!(report.metrics.total_credit, decimal("500.00"));
    assert_eq!(report.metrics.opening_balance, decimal("800.00"));
    assert_eq!(report.metrics.closing_balance, decimal("1300.00"));
    assert_eq!(report.account.holder_name.as_deref(), Some("RAVI KUMAR"));
    assert_eq!(report.account.account_number.as_deref(), Some("1234"));

    Ok(())
}

#[test]
fn test_engine_reports_account_info_as_absent_without_ocr_text() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("april.csv");
    fs::write(&path, STATEMENT)?;

    let report = StatementEngine::new(canara()?).run(&path)?;

    assert_eq!(report.account, AccountInfo::default());

    Ok(())
}

#[test]
fn test_engine_passes_resolution_hint_to_ocr_source() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("april.csv");
    fs::write(&path, STATEMENT)?;

    let ocr = Arc::new(RecordingOcr { hints: Mutex::new(Vec::new()) });

    struct Shared(Arc<RecordingOcr>);

    impl OcrTextSource for Shared {
        fn first_page_text(&self, document: &Path, resolution_hint: u32) -> Option<String> {
            self.0.first_page_text(document, resolution_hint)
        }
    }

    let engine = StatementEngine::from_sources(canara()?, CsvTableSource, Shared(ocr.clone()));
    let report = engine.run(&path)?;
    engine.clone().with_resolution_hint(150).run(&path)?;

    assert_eq!(report.account.holder_name.as_deref(), Some("ASHA RAO"));
    assert_eq!(*ocr.hints.lock().unwrap(), vec![DEFAULT_RESOLUTION_HINT, 150]);

    Ok(())
}

#[test]
fn test_engine_reports_empty_document_as_no_table() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("blank.csv");
    fs::write(&path, ",,\n\n , \n")?;

    let result = StatementEngine::new(canara()?).run(&path);

    assert!(matches!(result, Err(PipelineError::NoTableFound)));

    Ok(())
}

#[test]
fn test_engine_reports_wrong_bank_as_header_not_found() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("april.csv");
    fs::write(&path, STATEMENT)?;

    let axis = ProfileRegistry::builtin().resolve("axis")?;
    let result = StatementEngine::new(axis).run(&path);

    assert!(matches!(result, Err(PipelineError::HeaderNotFound { .. })));

    Ok(())
}

#[test]
fn test_engine_reports_missing_document_as_source_error() -> Result<()> {
    let result = StatementEngine::new(canara()?).run(Path::new("missing/statement.csv"));

    assert!(matches!(result, Err(PipelineError::Source(SourceError::NotFound(_)))));

    Ok(())
}

#[tokio::test]
async fn test_batch_returns_results_in_input_order() -> Result<()> {
    let directory = tempdir()?;
    let mut documents = Vec::new();

    for index in 0..6 {
        let path = directory.path().join(format!("statement_{index}.csv"));

        if index == 3 {
            fs::write(&path, "")?;
        } else {
            fs::write(&path, STATEMENT)?;
        }

        documents.push(path);
    }

    let engine = StatementEngine::new(canara()?).with_concurrency(2);
    let results = engine.run_batch(documents.clone()).await;

    let returned: Vec<PathBuf> = results.iter().map(|(path, _)| path.clone()).collect();

    assert_eq!(returned, documents);
    assert!(matches!(results[3].1, Err(PipelineError::NoTableFound)));
    assert_eq!(results.iter().filter(|(_, result)| result.is_ok()).count(), 5);

    Ok(())
}

#[tokio::test]
async fn test_batch_isolates_panicking_statement() -> Result<()> {
    let engine = StatementEngine::from_sources(canara()?, ExplodingSource, SidecarOcrSource)
        .with_concurrency(0);

    let documents = vec![PathBuf::from("a.csv"), PathBuf::from("boom.csv"), PathBuf::from("c.csv")];
    let results = engine.run_batch(documents).await;

    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(PipelineError::Processing(_))));
    assert!(results[2].1.is_ok());

    Ok(())
}

#[tokio::test]
async fn test_batch_of_nothing_is_empty() -> Result<()> {
    let results = StatementEngine::new(canara()?).run_batch(Vec::new()).await;

    assert!(results.is_empty());

    Ok(())
}
