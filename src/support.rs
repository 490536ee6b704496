//! File-system and process wrappers used by the loaders and the binaries.

use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::error::{BuildError, BuildResult};

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct ExecOutput {
  /// Exit code, `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  /// Bytes written to stdout.
  pub stdout: Vec<u8>,
  /// Bytes written to stderr.
  pub stderr: Vec<u8>,
}

/// Execute a command to completion, capturing its output.
pub fn exec<I, S>(
  cmd: &str,
  args: I,
  cwd: Option<&Path>,
  env: Option<&[(&str, &str)]>,
) -> io::Result<ExecOutput>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut command = Command::new(cmd);
  command.args(args);
  if let Some(dir) = cwd {
    command.current_dir(dir);
  }
  if let Some(vars) = env {
    command.env_clear();
    command.envs(vars.iter().copied());
  }

  let output = command.output()?;
  Ok(ExecOutput {
    code: output.status.code(),
    stdout: output.stdout,
    stderr: output.stderr,
  })
}

fn metadata(path: &Path) -> io::Result<Option<Metadata>> {
  match fs::metadata(path) {
    Ok(meta) => Ok(Some(meta)),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
    Err(err) => Err(err),
  }
}

/// Test whether anything exists at `path`.
///
/// Only a missing path yields `false`; any other failure is returned.
pub fn exists(path: &Path) -> io::Result<bool> {
  Ok(metadata(path)?.is_some())
}

/// Test whether `path` exists and is a directory.
pub fn dir_exists(path: &Path) -> io::Result<bool> {
  Ok(metadata(path)?.is_some_and(|meta| meta.is_dir()))
}

/// Test whether `path` exists and is a regular file.
pub fn file_exists(path: &Path) -> io::Result<bool> {
  Ok(metadata(path)?.is_some_and(|meta| meta.is_file()))
}

/// Remove a file or a directory tree. Missing paths are ignored.
pub fn rmrf(path: &Path) -> io::Result<()> {
  let raw = path.as_os_str();
  if raw.is_empty() || raw == "." || raw == "/" {
    return Err(io::Error::new(
      ErrorKind::InvalidInput,
      format!("refusing to remove root path {:?}", path),
    ));
  }

  let result = match fs::symlink_metadata(path) {
    Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
    Ok(_) => fs::remove_file(path),
    Err(err) => Err(err),
  };
  match result {
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
    other => other,
  }
}

/// Ensure `path` is a directory, replacing whatever non-directory occupies it.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
  if dir_exists(path)? {
    return Ok(());
  }
  rmrf(path)?;
  fs::create_dir_all(path)
}

/// Ensure the parent directory of a file exists.
pub fn ensure_dir_for_file(path: &Path) -> io::Result<()> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
    _ => Ok(()),
  }
}

/// Copy a file.
pub fn cp(from: &Path, to: &Path) -> io::Result<u64> {
  fs::copy(from, to)
}

/// Read a JSON document, returning `None` when the file does not exist.
///
/// Unreadable or malformed files are errors; only absence is treated as a fallback.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> BuildResult<Option<T>> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
    Err(err) => return Err(BuildError::io(path, err)),
  };
  serde_json::from_str(&content)
    .map(Some)
    .map_err(|err| BuildError::parse(path, err))
}

/// Serialise a value as JSON indented by four spaces.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> BuildResult<String> {
  let mut buffer = Vec::new();
  let formatter = PrettyFormatter::with_indent(b"    ");
  let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
  value.serialize(&mut serializer)?;
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a value as four-space indented JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> BuildResult<()> {
  let json = to_json_string(value)?;
  write(path, json.as_bytes())
}

/// Write data to a file.
pub fn write(path: &Path, data: &[u8]) -> BuildResult<()> {
  fs::write(path, data).map_err(|err| BuildError::io(path, err))
}
