use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Run directory under construction.
///
/// Files are written into a hidden sibling directory and only become visible
/// under their final name on [`StagedRun::commit`]. Dropping an uncommitted run
/// removes the staging directory.
#[derive(Debug)]
pub struct StagedRun {
    staging_dir: PathBuf,
    final_dir: PathBuf,
    committed: bool,
}

impl StagedRun {
    pub fn begin(out_dir: &Path, run_name: &str) -> io::Result<Self> {
        fs::create_dir_all(out_dir)?;
        let final_dir = out_dir.join(run_name);
        if final_dir.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("run directory {} already exists", final_dir.display()),
            ));
        }

        let staging_dir = out_dir.join(format!(".staging__{run_name}"));
        fs::create_dir(&staging_dir)?;

        Ok(Self {
            staging_dir,
            final_dir,
            committed: false,
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn final_dir(&self) -> &Path {
        &self.final_dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.staging_dir.join(file_name)
    }

    pub fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> io::Result<u64> {
        let data = serde_json::to_vec_pretty(value)?;
        fs::write(self.path(file_name), &data)?;
        Ok(data.len() as u64)
    }

    /// Publish the run directory under its final name.
    pub fn commit(mut self) -> io::Result<PathBuf> {
        sync_dir(&self.staging_dir)?;
        fs::rename(&self.staging_dir, &self.final_dir)?;
        if let Some(parent) = self.final_dir.parent()
            && !parent.as_os_str().is_empty()
        {
            sync_dir(parent)?;
        }
        self.committed = true;
        Ok(self.final_dir.clone())
    }
}

impl Drop for StagedRun {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_dir_all(&self.staging_dir);
        }
    }
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
