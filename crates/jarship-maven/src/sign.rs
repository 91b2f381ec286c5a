//! Detached ASCII-armored signatures via `gpg`.
//!
//! Key material given as a property (an armored key, or a secret key ring
//! file) is imported into a throw-away GnuPG home that lives as long as the
//! [`GpgSigner`]. The user's own keyring is only touched through
//! `signing.gnupg.*`.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use jarship_core::signing::SigningKeySource;
use jarship_util::errors::JarshipError;
use jarship_util::process::CommandBuilder;

const DEFAULT_GPG: &str = "gpg";

#[derive(Debug)]
pub struct GpgSigner {
    program: String,
    home_dir: Option<PathBuf>,
    key: Option<String>,
    passphrase: Option<String>,
    loopback: bool,
    _scratch_home: Option<TempDir>,
}

impl GpgSigner {
    /// Set up signing for `source`, importing key material where needed.
    pub fn prepare(source: &SigningKeySource) -> miette::Result<Self> {
        match source {
            SigningKeySource::InMemory {
                key,
                password,
                key_id,
            } => {
                if key.trim().is_empty() {
                    return Err(JarshipError::Signing {
                        message: "signingKey is set but empty".to_string(),
                    }
                    .into());
                }
                let scratch = scratch_home()?;
                import(DEFAULT_GPG, scratch.path(), ImportFrom::Armored(key))?;
                Ok(Self {
                    program: DEFAULT_GPG.to_string(),
                    home_dir: Some(scratch.path().to_path_buf()),
                    key: key_id.clone(),
                    passphrase: password.clone(),
                    loopback: true,
                    _scratch_home: Some(scratch),
                })
            }
            SigningKeySource::KeyId {
                key_id,
                password,
                secret_key_ring_file,
            } => {
                if key_id.trim().is_empty() {
                    return Err(JarshipError::Signing {
                        message: "signing.keyId is set but empty".to_string(),
                    }
                    .into());
                }
                let Some(ring) = secret_key_ring_file else {
                    return Err(JarshipError::Signing {
                        message: "signing.keyId requires signing.secretKeyRingFile".to_string(),
                    }
                    .into());
                };
                if password.is_none() {
                    return Err(JarshipError::Signing {
                        message: "signing.keyId requires signing.password".to_string(),
                    }
                    .into());
                }
                if !ring.is_file() {
                    return Err(JarshipError::Signing {
                        message: format!("secret key ring {} does not exist", ring.display()),
                    }
                    .into());
                }
                let scratch = scratch_home()?;
                import(DEFAULT_GPG, scratch.path(), ImportFrom::File(ring))?;
                Ok(Self {
                    program: DEFAULT_GPG.to_string(),
                    home_dir: Some(scratch.path().to_path_buf()),
                    key: Some(key_id.clone()),
                    passphrase: password.clone(),
                    loopback: true,
                    _scratch_home: Some(scratch),
                })
            }
            SigningKeySource::GpgCommand {
                key_name,
                executable,
                home_dir,
                passphrase,
                use_legacy_gpg,
            } => Ok(Self {
                program: executable.clone(),
                home_dir: home_dir.clone(),
                key: Some(key_name.clone()).filter(|k| !k.is_empty()),
                passphrase: passphrase.clone(),
                // gpg 1.x has no --pinentry-mode.
                loopback: !use_legacy_gpg && passphrase.is_some(),
                _scratch_home: None,
            }),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments that sign `file` into `output`.
    pub fn sign_args(&self, file: &Path, output: &Path) -> Vec<String> {
        let mut args = vec!["--batch".to_string(), "--yes".to_string()];
        if let Some(home) = &self.home_dir {
            args.push("--homedir".to_string());
            args.push(home.to_string_lossy().to_string());
        }
        if let Some(key) = &self.key {
            args.push("--local-user".to_string());
            args.push(key.clone());
        }
        if self.loopback {
            args.extend(
                ["--pinentry-mode", "loopback", "--passphrase-fd", "0"].map(str::to_string),
            );
        } else if self.passphrase.is_some() {
            args.extend(["--passphrase-fd", "0"].map(str::to_string));
        }
        args.push("--armor".to_string());
        args.push("--output".to_string());
        args.push(output.to_string_lossy().to_string());
        args.push("--detach-sign".to_string());
        args.push(file.to_string_lossy().to_string());
        args
    }

    /// Write `<file>.asc`. Any gpg failure is fatal.
    pub fn sign(&self, file: &Path) -> miette::Result<PathBuf> {
        let mut output = file.as_os_str().to_os_string();
        output.push(".asc");
        let output = PathBuf::from(output);

        let mut cmd = CommandBuilder::new(self.program.clone()).args(self.sign_args(file, &output));
        if self.loopback || self.passphrase.is_some() {
            let mut pass = self.passphrase.clone().unwrap_or_default();
            pass.push('\n');
            cmd = cmd.stdin(pass);
        }
        let out = cmd.exec().map_err(|e| JarshipError::Signing {
            message: format!("could not run {}: {e}", self.program),
        })?;
        if !out.status.success() {
            return Err(JarshipError::Signing {
                message: format!(
                    "{} failed to sign {}: {}",
                    self.program,
                    file.display(),
                    String::from_utf8_lossy(&out.stderr).trim()
                ),
            }
            .into());
        }
        tracing::debug!("signed {}", file.display());
        Ok(output)
    }
}

fn scratch_home() -> miette::Result<TempDir> {
    tempfile::Builder::new()
        .prefix("jarship-gnupg")
        .tempdir()
        .map_err(|e| JarshipError::Io(e).into())
}

enum ImportFrom<'a> {
    Armored(&'a str),
    File(&'a Path),
}

fn import(program: &str, home: &Path, from: ImportFrom<'_>) -> miette::Result<()> {
    let mut cmd = CommandBuilder::new(program)
        .arg("--batch")
        .arg("--homedir")
        .arg(home.to_string_lossy().to_string())
        .arg("--import");
    cmd = match from {
        ImportFrom::Armored(key) => cmd.stdin(key.as_bytes().to_vec()),
        ImportFrom::File(path) => cmd.arg(path.to_string_lossy().to_string()),
    };
    let out = cmd.exec().map_err(|e| JarshipError::Signing {
        message: format!("could not run {program}: {e}"),
    })?;
    if !out.status.success() {
        return Err(JarshipError::Signing {
            message: format!(
                "key import failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            ),
        }
        .into());
    }
    Ok(())
}
