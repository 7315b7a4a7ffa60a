//! Helpers for driving the `bd-meta` binary in a scratch workspace.

use assert_cmd::Command;
use std::path::PathBuf;
use std::process::ExitStatus;
use tempfile::TempDir;

/// A temporary project root with a `.beads/` directory path inside it.
pub struct BdMetaWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
    pub beads_dir: PathBuf,
}

impl BdMetaWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().to_path_buf();
        let beads_dir = root.join(".beads");
        Self {
            _temp: temp,
            root,
            beads_dir,
        }
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `bd-meta` in the workspace root with a clean environment.
pub fn run_bd_meta<I, S>(workspace: &BdMetaWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    run_bd_meta_with_env(workspace, args, std::iter::empty::<(&str, &str)>(), label)
}

/// Like [`run_bd_meta`], with extra environment variables.
pub fn run_bd_meta_with_env<I, S, E, K, V>(
    workspace: &BdMetaWorkspace,
    args: I,
    env: E,
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<std::ffi::OsStr>,
    V: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::cargo_bin("bd-meta").expect("bd-meta binary");
    cmd.current_dir(&workspace.root)
        .env_remove("BD_LEGACY_LAYOUT")
        .env_remove("BEADS_DIR")
        .env_remove("RUST_LOG")
        .args(args)
        .envs(env);

    let output = cmd.output().expect("run bd-meta");
    let result = CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] stderr:\n{}", result.stderr);
    }
    result
}
