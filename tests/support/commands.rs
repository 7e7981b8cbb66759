//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an nv command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - NV_CONFIG pointing at the test settings
    /// - Current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("nv").expect("failed to find nv binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NV_CONFIG", self.config_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("NV_PASSWORD");
        cmd.env_remove("NV_LOG");
        cmd.env_remove("WORKON_HOME");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `nv create`.
    pub fn create(&self, name: &str, args: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("create");
        if !name.is_empty() {
            cmd.arg(name);
        }
        cmd.args(args);
        cmd.output().expect("failed to run nv create")
    }

    /// Shortcut for `nv rm`.
    pub fn rm(&self, name: &str) -> Output {
        self.cmd()
            .args(["rm", name])
            .output()
            .expect("failed to run nv rm")
    }

    /// Shortcut for `nv run -e NAME [extra] -- COMMAND...`.
    pub fn run(&self, name: &str, extra: &[&str], command: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["run", "-e", name]);
        cmd.args(extra);
        cmd.arg("--");
        cmd.args(command);
        cmd.output().expect("failed to run nv run")
    }

    /// Shortcut for `nv status`.
    pub fn status(&self, name: &str) -> Output {
        self.cmd()
            .args(["status", name])
            .output()
            .expect("failed to run nv status")
    }

    /// Shortcut for `nv secrets ACTION [args] -e NAME [extra]`.
    pub fn secrets(&self, action: &str, args: &[&str], name: &str, extra: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["secrets", action]);
        cmd.args(args);
        cmd.args(["-e", name]);
        cmd.args(extra);
        cmd.output().expect("failed to run nv secrets")
    }
}
