//! Terminal output for the gh-release binary.

use console::style;

use crate::github::{Coordinate, Release};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Show the coordinate and branch detected from the local checkout.
pub fn display_remote(coordinate: &Coordinate, branch: &str) {
    let coordinate = if coordinate.is_empty() {
        style("(none)".to_string()).dim()
    } else {
        style(coordinate.to_string()).bold()
    };
    let branch = if branch.is_empty() {
        style("(none)".to_string()).dim()
    } else {
        style(branch.to_string()).bold()
    };
    println!("remote: {}", coordinate);
    println!("branch: {}", branch);
}

/// Confirmation line printed after a release or pre-release is created.
pub fn display_release(release: &Release) {
    let kind = if release.prerelease {
        "pre-release"
    } else {
        "release"
    };
    display_success(&format!(
        "Created {} {}: {}",
        kind,
        style(&release.tag_name).cyan(),
        release.html_url
    ));
}
