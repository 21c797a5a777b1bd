//! Session management
//!
//! A session is one execution of a navigation executable. Each session gets its own directory
//! under `$LINE_NAV_SW_ROOT/{sessions_dir}` holding the log file, and an epoch which log
//! timestamps are measured from.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// strftime format of the timestamp in session directory names
const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Session {
    /// Name of the executable which owns the session
    pub exec_name: String,

    /// Directory holding everything the session writes
    pub session_root: PathBuf,

    /// Path of the session's log file, inside `session_root`
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable ({}) is not set", crate::host::SW_ROOT_ENV_VAR)]
    SwRootNotSet,

    #[error("Could not create the session directory {0:?}: {1}")]
    CannotCreateDir(PathBuf, std::io::Error),

    #[error("A session has already been started by this process")]
    AlreadyStarted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start the session for this process.
    ///
    /// Fixes the session epoch and creates `{sessions_dir}/{exec_name}_{timestamp}` under the
    /// software root. Only one session may be started per process.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let sw_root = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;

        let epoch = Utc::now();
        SESSION_EPOCH
            .try_init_once(|| epoch)
            .map_err(|_| SessionError::AlreadyStarted)?;

        let session_root = sw_root
            .join(sessions_dir)
            .join(session_dir_name(exec_name, &epoch));

        fs::create_dir_all(&session_root)
            .map_err(|e| SessionError::CannotCreateDir(session_root.clone(), e))?;

        Ok(Self::in_dir(exec_name, &session_root))
    }

    /// Describe a session living in an existing directory, without touching the epoch.
    pub fn in_dir(exec_name: &str, session_root: &Path) -> Self {
        Self {
            exec_name: exec_name.to_string(),
            session_root: session_root.to_path_buf(),
            log_file_path: session_root.join(format!("{}.log", exec_name)),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Seconds since the session epoch, or `None` if no session has been started.
pub fn elapsed_seconds() -> Option<f64> {
    let epoch = SESSION_EPOCH.get()?;
    time::duration_to_seconds(Utc::now() - *epoch)
}

/// The session epoch, or `None` if no session has been started.
pub fn epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get()
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn session_dir_name(exec_name: &str, epoch: &DateTime<Utc>) -> String {
    format!("{}_{}", exec_name, epoch.format(DIR_TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_session_dir_name() {
        let epoch: DateTime<Utc> = "2021-03-07T14:05:09Z".parse().unwrap();
        assert_eq!(session_dir_name("nav_exec", &epoch), "nav_exec_20210307_140509");
    }

    #[test]
    fn test_in_dir() {
        let session = Session::in_dir("follow_test", Path::new("/tmp/sessions/s0"));

        assert_eq!(session.exec_name, "follow_test");
        assert_eq!(
            session.log_file_path,
            PathBuf::from("/tmp/sessions/s0/follow_test.log")
        );
    }
}
