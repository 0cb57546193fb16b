use vimstack::histerrs::extract;

use crate::metadata::FixtureMetadata;

#[derive(Debug, Clone)]
pub enum TestResult {
    Passed,
    Failed(String),
    Skipped(String),
}

pub fn run_fixture(metadata: &FixtureMetadata, msghist: &str) -> TestResult {
    match check(metadata, msghist) {
        Ok(()) => TestResult::Passed,
        Err(reason) => match &metadata.description {
            Some(description) => TestResult::Failed(format!("{description}: {reason}")),
            None => TestResult::Failed(reason),
        },
    }
}

fn check(metadata: &FixtureMetadata, msghist: &str) -> Result<(), String> {
    let got = extract(msghist);

    if got.len() != metadata.expect.len() {
        return Err(format!(
            "expected {} records, extracted {}",
            metadata.expect.len(),
            got.len()
        ));
    }

    for (i, (got, want)) in got.iter().zip(&metadata.expect).enumerate() {
        if got != want {
            return Err(format!("record {}: got {got:?}, want {want:?}", i + 1));
        }
    }

    if metadata.build {
        for record in &got {
            if let Err(err) = vimstack::build_offline(&record.throwpoint) {
                return Err(format!("{}: {err}", record.throwpoint));
            }
        }
    }

    Ok(())
}
