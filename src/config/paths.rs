use std::path::PathBuf;

use tracing::debug;

use super::error::ConfigResult;

/// Directory the app keeps its files in (`~/.config/leximon-admin` on unix,
/// `%APPDATA%\leximon-admin` on windows). Falls back to the cwd when no home
/// is available.
pub fn app_dir() -> PathBuf {
    let app_name = crate::APPLICATION_NAME;

    #[cfg(unix)]
    let base = std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config"));
    #[cfg(windows)]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);

    match base {
        Some(base) => base.join(app_name),
        None => PathBuf::from("."),
    }
}

pub fn config_file(use_local: bool) -> PathBuf {
    if use_local {
        return PathBuf::from("./config.toml");
    }

    let path = app_dir().join("config.toml");
    if path.exists() {
        return path;
    }

    PathBuf::from("./config.toml")
}

/// Default location of the persisted session token.
pub fn default_token_file() -> PathBuf {
    app_dir().join("token")
}

pub fn read_config(use_local: bool) -> ConfigResult<String> {
    let filename = config_file(use_local);

    tracing::trace!("looking for config at: {}", filename.display());
    if !filename.exists() {
        return Err(crate::config::error::ConfigError::ConfigNotFound);
    }

    let filename = filename.canonicalize()?;
    debug!("using {} as configuration file", filename.display());

    Ok(std::fs::read_to_string(filename)?)
}

#[cfg(test)]
mod test {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_config_file_local() {
        let path = config_file(true);
        assert_eq!(path, PathBuf::from("./config.toml"));
    }

    #[test]
    fn test_config_file_from_app_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fake_dir = temp_dir
            .path()
            .join(".config")
            .join(crate::APPLICATION_NAME);
        fs::create_dir_all(&fake_dir).unwrap();
        let config_path = fake_dir.join("config.toml");
        fs::write(&config_path, "dummy = true").unwrap();

        #[cfg(unix)]
        unsafe {
            env::set_var("HOME", temp_dir.path());
        }

        #[cfg(windows)]
        unsafe {
            env::set_var("APPDATA", temp_dir.path().join(".config"));
        }

        let path = config_file(false);
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_default_token_file_in_app_dir() {
        let temp_dir = tempfile::tempdir().unwrap();

        #[cfg(unix)]
        unsafe {
            env::set_var("HOME", temp_dir.path());
        }

        #[cfg(windows)]
        unsafe {
            env::set_var("APPDATA", temp_dir.path().join(".config"));
        }

        let path = default_token_file();
        assert!(path.starts_with(temp_dir.path()));
        assert!(path.ends_with("token"));
    }

    #[test]
    fn test_read_config_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        fs::write(&file_path, "foo = 'bar'").unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let result = read_config(true);

        env::set_current_dir(original_dir).unwrap();

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "foo = 'bar'");
    }
}
