//! Build script for c2p - stamps dev builds with the git commit
//!
//! Without the `release` feature, `VERGEN_GIT_SHA` is emitted and appended
//! to `c2p --version`. Outside a git checkout it falls back to "unknown",
//! which the CLI treats as absent. Release builds emit nothing.

fn main() {
    #[cfg(not(feature = "release"))]
    emit_git_sha();
}

#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    if let Err(e) = emitted {
        println!("cargo:warning=Failed to get git info: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
