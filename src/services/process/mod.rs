mod resolver;
mod system;
mod r#trait;

pub use self::resolver::WindowCommandResolver;
pub use self::system::SystemProcessTable;
pub use self::r#trait::ProcessTable;
