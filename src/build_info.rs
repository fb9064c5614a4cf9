/// Build-time git commit SHA stamped by build.rs when available.
pub fn git_sha() -> Option<&'static str> {
    option_env!("TIZUM_BUILD_GIT_SHA")
}

/// Crate version, suffixed with the git SHA when the build was stamped.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match git_sha() {
        Some(sha) => format!("{version} ({sha})"),
        None => version.to_string(),
    }
}
