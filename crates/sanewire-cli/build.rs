use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SANEWIRE_COMMIT");

    let commit = env::var("SANEWIRE_COMMIT")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| git(&["rev-parse", "--short=10", "HEAD"]).filter(|v| !v.is_empty()))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let dirty = commit != UNKNOWN
        && git(&["status", "--porcelain", "--untracked-files=no"])
            .is_some_and(|status| !status.is_empty());
    let commit = if dirty {
        format!("{commit}-dirty")
    } else {
        commit
    };

    let date = git(&["log", "-1", "--format=%cs"])
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    println!("cargo:rustc-env=SANEWIRE_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=SANEWIRE_BUILD_DATE={date}");
}

/// Trimmed stdout of a successful git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
