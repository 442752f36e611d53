use std::path::Path;
use std::process::Command;

pub trait PackageInstaller {
    fn install(&self, package: &str, target_dir: &Path) -> Result<(), String>;
}

/// Shells out to `pip install <package> -t <target_dir>`, one invocation per
/// package. Dependency resolution stays entirely inside pip.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipInstaller;

impl PackageInstaller for PipInstaller {
    fn install(&self, package: &str, target_dir: &Path) -> Result<(), String> {
        let output = Command::new("pip")
            .arg("install")
            .arg(package)
            .arg("-t")
            .arg(target_dir)
            .output()
            .map_err(|error| format!("failed to spawn pip for {package}: {error}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "pip install {package} exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        Ok(())
    }
}
