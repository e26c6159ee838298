/// Test utilities for CSV-backed storage
///
/// The temporary directory is removed when the environment is dropped, even if
/// the test panics.
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;

/// Shared-file fixture: three expenses and three logins.
/// The admin row carries credentials only.
pub const SCENARIO_CSV: &str = "\
date,amount,category,paid by,username,password,usertype
2024-01-05,100,Food,sakshi,sakshi,sakshi123,user
2024-02-10,50,Travel,sakshi,,,
2024-01-20,30,Food,akanksha,akanksha,akanksha123,user
,0,,,admin,admin123,admin
";

/// Test environment that provides a temporary directory and connection
pub struct TestEnvironment {
    pub connection: CsvConnection,
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// Environment with `SCENARIO_CSV` written to `s1.csv`
    pub fn with_scenario() -> Result<Self> {
        let env = Self::new()?;
        env.write_file("s1.csv", SCENARIO_CSV);
        Ok(env)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.base_path.join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn append_file(&self, relative: &str, content: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.path(relative))
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_write_and_append() -> Result<()> {
        let env = TestEnvironment::new()?;
        env.write_file("nested/a.csv", "x\n");
        env.append_file("nested/a.csv", "y\n");
        assert_eq!(env.read_file("nested/a.csv"), "x\ny\n");
        Ok(())
    }
}
