//! Build script that stamps the binary's version with the git commit.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let package = env!("CARGO_PKG_VERSION");
    let version = match git_commit() {
        Some(commit) => format!("{} ({})", package, commit),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=NOZBE_VERSION={}", version);
}

/// Short hash of HEAD, with a `-dirty` suffix for uncommitted changes.
fn git_commit() -> Option<String> {
    let head = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !head.status.success() {
        return None;
    }

    let commit = String::from_utf8(head.stdout).ok()?.trim().to_string();
    if commit.is_empty() {
        return None;
    }

    let dirty = Command::new("git")
        .args(["status", "--porcelain", "--untracked-files=no"])
        .output()
        .ok()
        .is_some_and(|out| out.status.success() && !out.stdout.is_empty());

    Some(if dirty {
        format!("{}-dirty", commit)
    } else {
        commit
    })
}
