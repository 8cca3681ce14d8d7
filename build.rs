use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    let git_hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let is_release = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    // Development builds carry the commit in the version string
    if is_release {
        println!("cargo:rustc-env=BREVO_VERSION_SUFFIX=");
    } else {
        println!("cargo:rustc-env=BREVO_VERSION_SUFFIX=-dev.{}", git_hash);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
