//! Command line surface of the gh-release binary.

pub mod orchestration;

use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(
    name = "gh-release",
    version,
    about = "Create GitHub releases and pre-releases from a local git checkout"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Checkout whose .git directory is inspected"
    )]
    pub workdir: PathBuf,

    #[arg(long, global = true, help = "Repository owner (detected from .git/config)")]
    pub owner: Option<String>,

    #[arg(long, global = true, help = "Repository name (detected from .git/config)")]
    pub repo: Option<String>,

    #[arg(
        long,
        global = true,
        help = "GitHub token (defaults to the variables in [github] token_env)"
    )]
    pub token: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the detected owner/repo and current branch
    Remote,
    /// Print the next patch version after the latest release
    NextVersion,
    /// Create a release
    Release(ReleaseArgs),
    /// Create a pre-release
    Prerelease(PrereleaseArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    #[arg(short, long, help = "Target branch (defaults to the checked out branch)")]
    pub branch: Option<String>,

    #[arg(short, long, help = "Tag name (defaults to the next patch version)")]
    pub tag: Option<String>,

    #[arg(long, help = "Preview what would happen without creating anything")]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct PrereleaseArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    #[arg(short, long, help = "Delete and recreate the pre-release if the tag exists")]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_prerelease_force() {
        let args = Args::parse_from([
            "gh-release",
            "prerelease",
            "--force",
            "--tag",
            "v1.0.0-nightly",
            "--owner",
            "alice",
        ]);
        assert_eq!(args.owner.as_deref(), Some("alice"));
        match args.command {
            Command::Prerelease(pre) => {
                assert!(pre.force);
                assert_eq!(pre.release.tag.as_deref(), Some("v1.0.0-nightly"));
                assert_eq!(pre.release.branch, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(["gh-release", "next-version"]);
        assert_eq!(args.workdir, PathBuf::from("."));
        assert!(!args.verbose);
        assert_eq!(args.command, Command::NextVersion);
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Args::try_parse_from(["gh-release"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
