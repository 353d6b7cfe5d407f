use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sanewire_core::{DecodeOptions, ResponseKind, decode_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.bin");
        if !input.exists() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let kind = kind_for_case(&name)
            .ok_or_else(|| format!("cannot tell response kind of case '{}'", name))?;
        let output = path.join("expected_report.json");
        regenerate_one(&input, kind, &output)?;
    }

    Ok(())
}

/// Case directories are named `<kind>_<variant>`.
fn kind_for_case(name: &str) -> Option<ResponseKind> {
    ResponseKind::ALL
        .into_iter()
        .filter(|kind| name.starts_with(kind.as_str()))
        .max_by_key(|kind| kind.as_str().len())
}

fn regenerate_one(input: &Path, kind: ResponseKind, output: &Path) -> Result<(), String> {
    let report = decode_file(input, kind, DecodeOptions::default())
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
