pub mod profile;
pub mod workspace;

pub use profile::{Profile, ProfileStore, SplitDirection};
pub use workspace::{LiveWindow, LiveWorkspace, Node, WorkspaceReply};
