//! Python virtual environment handling.
//!
//! Activation never touches qgate's own process environment. Instead an
//! [`ActivatedEnvironment`] carries the variables an activate script would
//! set, and every tool invocation is run with that overlay.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ProjectLayout;
use crate::error::{GateError, Result};
use crate::shell::{
    executable_candidates, venv_bin_dir_name, CommandOptions, Invocation, ProcessRunner,
};

/// What `ensure` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The directory was missing and has been created.
    Created,
    /// An existing directory is reused.
    Reused,
}

/// A virtual environment directory, active or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    path: PathBuf,
    relative: PathBuf,
}

impl VirtualEnv {
    /// Locate the environment for a project layout.
    pub fn locate(layout: &ProjectLayout) -> Self {
        Self {
            path: layout.abs(&layout.venv),
            relative: layout.venv.clone(),
        }
    }

    /// Full path of the environment directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the project root, for messages.
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Whether the environment directory exists.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Directory holding the environment's executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join(venv_bin_dir_name())
    }

    /// Create the environment unless its directory already exists.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError` if the create command exits non-zero, and
    /// `CommandFailed` if it cannot be started.
    pub fn ensure(
        &self,
        runner: &mut dyn ProcessRunner,
        create: &Invocation,
        cwd: &Path,
    ) -> Result<EnsureOutcome> {
        if self.exists() {
            tracing::debug!("Reusing virtual environment at {}", self.path.display());
            return Ok(EnsureOutcome::Reused);
        }

        tracing::info!("Creating virtual environment at {}", self.path.display());
        let result = runner.run(create, &CommandOptions::captured(cwd))?;
        if !result.success {
            let mut message = match result.exit_code {
                Some(code) => format!("'{}' exited with code {}", create, code),
                None => format!("'{}' was terminated by a signal", create),
            };
            let output = result.combined_output();
            if !output.is_empty() {
                message.push_str(": ");
                message.push_str(&output);
            }
            return Err(GateError::EnvironmentError {
                path: self.relative.clone(),
                message,
            });
        }

        Ok(EnsureOutcome::Created)
    }

    /// Activate the environment for child processes.
    pub fn activate(self) -> Result<ActivatedEnvironment> {
        let bin_dir = self.bin_dir();
        let current = std::env::var_os("PATH").unwrap_or_default();
        let paths = std::iter::once(bin_dir.clone()).chain(std::env::split_paths(&current));
        let path: OsString =
            std::env::join_paths(paths).map_err(|e| GateError::EnvironmentError {
                path: self.relative.clone(),
                message: format!("cannot build PATH: {}", e),
            })?;

        tracing::debug!("Activated virtual environment at {}", self.path.display());
        Ok(ActivatedEnvironment {
            path_var: path.to_string_lossy().into_owned(),
            venv: self,
        })
    }
}

/// A virtual environment applied to every tool invocation.
///
/// Deactivation consumes the handle. A run that aborts on a fatal step
/// simply drops it without deactivating; the directory itself is durable.
#[derive(Debug)]
pub struct ActivatedEnvironment {
    venv: VirtualEnv,
    path_var: String,
}

impl ActivatedEnvironment {
    /// The underlying environment.
    pub fn venv(&self) -> &VirtualEnv {
        &self.venv
    }

    /// Apply the activation overlay to command options.
    pub fn apply(&self, options: &mut CommandOptions) {
        options.env.insert(
            "VIRTUAL_ENV".to_string(),
            self.venv.path.display().to_string(),
        );
        options
            .env
            .insert("PATH".to_string(), self.path_var.clone());
        options.env_remove.push("PYTHONHOME".to_string());
    }

    /// Point a bare program name at the environment's copy, if it has one.
    pub fn resolve(&self, invocation: &Invocation) -> Invocation {
        if Path::new(&invocation.program).components().count() != 1 {
            return invocation.clone();
        }

        let bin_dir = self.venv.bin_dir();
        executable_candidates(&invocation.program)
            .into_iter()
            .map(|name| bin_dir.join(name))
            .find(|candidate| candidate.is_file())
            .map(|found| invocation.with_program(found.display().to_string()))
            .unwrap_or_else(|| invocation.clone())
    }

    /// Deactivate. The directory stays on disk for the next run.
    pub fn deactivate(self) {
        tracing::debug!("Deactivated virtual environment at {}", self.venv.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;
    use crate::shell::{MockResponse, MockRunner};
    use std::fs;
    use tempfile::TempDir;

    fn layout(root: &Path) -> ProjectLayout {
        let mut config = GateConfig::default();
        config.project.library = Some(PathBuf::from("pkg"));
        ProjectLayout::resolve(root, &config)
    }

    fn create_cmd() -> Invocation {
        Invocation::new("python3", ["-m", "venv", "venv"])
    }

    #[test]
    fn ensure_reuses_existing_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("venv")).unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        let mut runner = MockRunner::new();

        let outcome = venv.ensure(&mut runner, &create_cmd(), temp.path()).unwrap();

        assert_eq!(outcome, EnsureOutcome::Reused);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn ensure_runs_create_command_when_missing() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        let mut runner = MockRunner::new();

        let outcome = venv.ensure(&mut runner, &create_cmd(), temp.path()).unwrap();

        assert_eq!(outcome, EnsureOutcome::Created);
        assert_eq!(runner.command_lines(), vec!["python3 -m venv venv"]);
    }

    #[test]
    fn ensure_reports_failed_creation() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        let mut runner = MockRunner::new();
        runner.respond(
            "python3",
            MockResponse::exit(1).with_stderr("No module named venv"),
        );

        let err = venv
            .ensure(&mut runner, &create_cmd(), temp.path())
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("exited with code 1"));
        assert!(msg.contains("No module named venv"));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_creates_directory_with_real_command() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        let mut runner = crate::shell::SystemRunner;

        let create = Invocation::new("mkdir", ["-p", "venv"]);
        venv.ensure(&mut runner, &create, temp.path()).unwrap();

        assert!(venv.exists());
    }

    #[test]
    fn activation_prepends_bin_dir_and_sets_virtual_env() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        let bin_dir = venv.bin_dir();
        let active = venv.activate().unwrap();

        let mut options = CommandOptions::default();
        active.apply(&mut options);

        let path = options.env.get("PATH").unwrap();
        assert!(path.starts_with(&bin_dir.display().to_string()));
        assert!(options.env.get("VIRTUAL_ENV").unwrap().ends_with("venv"));
        assert!(options.env_remove.contains(&"PYTHONHOME".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_prefers_environment_copy() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        fs::create_dir_all(venv.bin_dir()).unwrap();
        fs::write(venv.bin_dir().join("ruff"), "").unwrap();
        let active = venv.activate().unwrap();

        let ruff = active.resolve(&Invocation::new("ruff", ["check"]));
        assert!(ruff.program.ends_with("venv/bin/ruff"));
        assert_eq!(ruff.args, vec!["check"]);

        let sh = active.resolve(&Invocation::new("sh", ["-c", "true"]));
        assert_eq!(sh.program, "sh");

        let explicit = active.resolve(&Invocation::new("./tools/ruff", ["check"]));
        assert_eq!(explicit.program, "./tools/ruff");
    }

    #[test]
    fn deactivate_leaves_directory_in_place() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::locate(&layout(temp.path()));
        fs::create_dir_all(venv.bin_dir()).unwrap();

        let active = venv.clone().activate().unwrap();
        assert_eq!(active.venv(), &venv);
        active.deactivate();

        assert!(venv.exists());
    }

    #[test]
    fn relative_root_yields_absolute_activation() {
        let venv = VirtualEnv::locate(&layout(Path::new("proj")));
        assert!(venv.path().is_absolute());
        assert_eq!(venv.relative_path(), Path::new("venv"));

        let active = venv.activate().unwrap();
        let mut options = CommandOptions::captured(Path::new("proj"));
        active.apply(&mut options);
        assert!(Path::new(&options.env["VIRTUAL_ENV"]).is_absolute());
    }
}
