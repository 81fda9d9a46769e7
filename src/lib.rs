pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod release;
pub mod remote;
pub mod ui;
pub mod version;

pub use error::{FieldError, ReleaseError, Result};
pub use github::{Coordinate, Release, ReleaseApi, ReleaseRequest};
pub use release::{create_prerelease, create_release, find_next_release_version, Publisher};
