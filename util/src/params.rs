//! Parameter file loading
//!
//! Parameter files are TOML and live in the `params` directory under the software root.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::{fs, path::PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable ({}) is not set", crate::host::SW_ROOT_ENV_VAR)]
    SwRootNotSet,

    #[error("Could not read {0:?}: {1}")]
    FileLoadError(PathBuf, std::io::Error),

    #[error("Invalid parameters: {0}")]
    DeserialiseError(toml::de::Error),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file, given relative to `$LINE_NAV_SW_ROOT/params`.
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    let path = crate::host::get_sw_root()
        .map_err(|_| LoadError::SwRootNotSet)?
        .join("params")
        .join(param_file_path);

    let params_str =
        fs::read_to_string(&path).map_err(|e| LoadError::FileLoadError(path.clone(), e))?;

    from_str(&params_str)
}

/// Parse parameters from TOML already in memory.
pub fn from_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestParams {
        gain: f64,
        #[serde(default)]
        sensor_id: u8,
    }

    #[test]
    fn test_from_str() {
        let p: TestParams = from_str("gain = 3.0\nsensor_id = 1").unwrap();
        assert_eq!(p, TestParams { gain: 3.0, sensor_id: 1 });

        let p: TestParams = from_str("gain = 2.0").unwrap();
        assert_eq!(p.sensor_id, 0);

        assert!(matches!(
            from_str::<TestParams>("sensor_id = 1"),
            Err(LoadError::DeserialiseError(_))
        ));
    }
}
