//! Defaults used when an example leaves out a build configuration, a full
//! program or its build commands.

/// Application name used when no build configuration names a target.
pub const DEFAULT_APP_NAME: &str = "my_app";

/// CMake project that fetches the library and builds `<app_name>.cpp`.
pub fn default_build_config(app_name: &str) -> String {
    format!(
        r#"
cmake_minimum_required(VERSION 3.18)
project(xpress_example)

set(XPRESS_BUILD_TESTS OFF)
include(FetchContent)
FetchContent_Declare(
    xpress
    GIT_REPOSITORY https://github.com/dglaeser/xpress.git
    GIT_TAG main
)
FetchContent_MakeAvailable(xpress)

add_executable({app_name} {app_name}.cpp)
target_link_libraries({app_name} PRIVATE xpress::xpress)
"#
    )
}

/// Configure, build, then run the executable from the build directory.
pub fn default_build_commands(app_name: &str) -> String {
    format!(
        r#"
cmake -B build
cmake --build build
cd build && ./{app_name}
"#
    )
}

/// Embed a snippet into a complete program that reports success when the
/// snippet ran through.
pub fn wrap_snippet(snippet: &str) -> String {
    format!(
        r#"
#include <print>
#include <iostream>
#include <vector>
#include <array>
#include <xpress/xp.hpp>
#include <xpress/solvers/newton.hpp>

int main() {{
    using namespace xp;
    {snippet}
    std::cout << "Snippet finished" << std::endl;
    return 0;
}}
"#
    )
}
