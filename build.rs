use std::process::Command;

fn git(args: &[&str]) -> Option<std::process::Output> {
    Command::new("git").args(args).output().ok()
}

// Short commit hash for the health-check version string. Left unset outside
// a git checkout, in which case the version is just the package version.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");

    let Some(head) = git(&["rev-parse", "--short", "HEAD"]).filter(|o| o.status.success()) else {
        return;
    };
    let hash = String::from_utf8_lossy(&head.stdout).trim().to_string();
    if hash.is_empty() {
        return;
    }

    let dirty = git(&["diff", "--quiet"]).is_some_and(|o| !o.status.success());
    let version = if dirty { format!("{hash}-dirty") } else { hash };
    println!("cargo:rustc-env=GIT_HASH={version}");
}
