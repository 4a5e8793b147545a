use std::process::Command;

/// `git describe` output for the checked-out tree, if this is a git checkout
fn describe_checkout() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let package = env!("CARGO_PKG_VERSION");
    let version = match describe_checkout() {
        Some(described) if described != package => format!("{} ({})", package, described),
        _ => package.to_string(),
    };
    println!("cargo:rustc-env=NETREACH_VERSION={}", version);
}
