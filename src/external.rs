use crate::command::{CommandFactory, ExecutableCommand, ExecutionMode, ExitCode, Stdin, Stdout};
use crate::env::Environment;
use crate::errors::ShellError;
use crate::interpreter::Factory;
use anyhow::Result;
use log::debug;
use nix::unistd::{AccessFlags, access};
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Command that is not a builtin.
///
/// `path` becomes argument 0 of the launched program, followed by `args`.
pub struct ExternalCommand {
    path: PathBuf,
    args: Vec<OsString>,
    mode: ExecutionMode,
}

impl ExternalCommand {
    pub fn new(path: PathBuf, args: Vec<OsString>, mode: ExecutionMode) -> Self {
        Self { path, args, mode }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &OsStr,
        args: &[&OsStr],
        mode: ExecutionMode,
    ) -> Option<Box<dyn ExecutableCommand>> {
        // Absolute paths go straight to the launcher, which reports them if unusable.
        let path = if name.as_bytes().starts_with(b"/") {
            PathBuf::from(name)
        } else {
            let search_paths = env.get_var_os("PATH").unwrap_or_default();
            find_command_path(&env.current_dir, &search_paths, Path::new(name))?
        };
        debug!("{} resolved to {}", name.to_string_lossy(), path.display());
        Some(Box::new(ExternalCommand::new(
            path,
            args.iter().map(|x| x.to_os_string()).collect(),
            mode,
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdin: Box<dyn Stdin>,
        stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        if !is_executable(&self.path) {
            return Err(ShellError::NotExecutable(self.path).into());
        }
        let mut child = std::process::Command::new(&self.path)
            .args(&self.args)
            .stdin(stdin.stdio())
            .stdout(stdout.stdio())
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .spawn()
            .map_err(|source| ShellError::Spawn {
                path: self.path.clone(),
                source,
            })?;
        debug!("launched {} as pid {} ({:?})", self.path.display(), child.id(), self.mode);

        match self.mode {
            ExecutionMode::Background => {
                env.jobs.push(child);
                Ok(0)
            }
            ExecutionMode::Foreground => {
                let exit_status = child.wait()?;
                match exit_status.code() {
                    Some(x) => Ok(x),
                    None => Ok(terminated_by_signal(exit_status)),
                }
            }
        }
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

/// Resolve a command name to an executable file.
///
/// Search order:
/// 1. `cwd` joined with `name`. Unlike most shells, no `./` prefix is needed.
/// 2. Each directory of `search_paths` (a `PATH`-style list) in order; empty
///    entries are skipped.
///
/// The first candidate that is a regular file the current user may execute wins.
/// Returns `None` when nothing matches.
pub fn find_command_path(cwd: &Path, search_paths: &OsStr, name: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(name);
    if is_executable(&candidate) {
        return Some(candidate);
    }
    find_in_path(search_paths, name)
}

fn find_in_path(search_paths: &OsStr, cmd: &Path) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(cmd))
        .find(|path| is_executable(path))
}

/// Regular file that passes `access(X_OK)` for the effective user.
fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
