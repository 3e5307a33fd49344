//! Stamps the binary with where and when it was built
//!
//! Sets `RADAR_GIT_REVISION`, `RADAR_BUILT_AT` (UTC) and `RADAR_BUILD_PROFILE`
//! for `build_info`.

use std::process::Command;

/// Trimmed stdout of a successful `git` invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let revision = match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(rev) if git(&["status", "--porcelain", "--untracked-files=no"]).is_some() => {
            format!("{}-dirty", rev)
        }
        Some(rev) => rev,
        None => "unknown".to_string(),
    };

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=RADAR_GIT_REVISION={}", revision);
    println!("cargo:rustc-env=RADAR_BUILT_AT={}", built_at);
    println!("cargo:rustc-env=RADAR_BUILD_PROFILE={}", profile);

    println!("cargo:rerun-if-changed=build.rs");
    if let Some(head) = git(&["rev-parse", "--git-path", "HEAD"]) {
        println!("cargo:rerun-if-changed={}", head);
    }
}
