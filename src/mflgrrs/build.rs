// mflgrrs/build.rs

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let crate_env_name = "MFLGRRS_CLI_VERSION";
    let version = std::env::var("CARGO_PKG_VERSION")?;
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let local_hash = get_git_hash(".").unwrap_or_else(|| "unknown".to_string());
    let local_dirty = check_git_dirty_current().unwrap_or("");

    println!(
        "cargo:rustc-env={}={} {}{}-{}",
        crate_env_name, version, local_hash, local_dirty, profile
    );
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    Ok(())
}

fn get_git_hash(git_dir: &str) -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["-C", git_dir, "rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some("no-commits".to_string());
    }
    Some(hash)
}

fn check_git_dirty_current() -> Option<&'static str> {
    let status = std::process::Command::new("git")
        .args(["diff", "--quiet", "."])
        .status()
        .ok()?;
    Some(if status.success() { "" } else { "-dirty" })
}
