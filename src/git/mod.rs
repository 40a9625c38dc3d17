// Git repository access.
// Clones GitHub repositories locally and reads commit history through the git executable.

pub mod commit;
pub mod repo;

pub use commit::Commit;
pub use repo::{CloneStatus, GitRepo, UNKNOWN};
