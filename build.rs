//! Generates `build_info.rs` in OUT_DIR with the commit and build date
//! shown by `dino-dash --version`.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short commit hash from `BUILD_COMMIT`, else from git, else "unknown".
fn commit_hash() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    let output = match Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
    {
        Ok(output) if output.status.success() => output,
        _ => return "unknown".into(),
    };
    match String::from_utf8(output.stdout) {
        Ok(hash) if hash.trim().len() == 7 => hash.trim().to_owned(),
        _ => "unknown".into(),
    }
}

/// `BUILD_DATE` if set, else today's UTC date.
fn build_date() -> String {
    env::var("BUILD_DATE").unwrap_or_else(|_| chrono::Utc::now().date_naive().to_string())
}

fn main() {
    let mut source = String::new();
    for (name, value) in [("BUILD_COMMIT", commit_hash()), ("BUILD_DATE", build_date())] {
        let _ = writeln!(source, "pub const {name}: &str = {value:?};");
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("build_info.rs"), source).expect("write build_info.rs");

    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
