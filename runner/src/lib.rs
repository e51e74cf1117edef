pub mod driver;
pub mod error;
pub mod toolchain;
pub mod workdir;

pub use driver::{BUILD_CONFIG_FILE, DEFAULT_WORKDIR, Driver};
pub use error::DriverError;
pub use toolchain::Toolchain;
pub use workdir::WorkDir;
