/// Compilers handed to the build commands of every example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub c_compiler: String,
    pub cxx_compiler: String,
}

impl Toolchain {
    pub fn new(c_compiler: impl Into<String>, cxx_compiler: impl Into<String>) -> Self {
        Toolchain {
            c_compiler: c_compiler.into(),
            cxx_compiler: cxx_compiler.into(),
        }
    }

    /// Environment set on each spawned command. The driver's own process
    /// environment is left untouched.
    pub fn env(&self) -> [(&'static str, &str); 2] {
        [
            ("CC", self.c_compiler.as_str()),
            ("CXX", self.cxx_compiler.as_str()),
        ]
    }
}
