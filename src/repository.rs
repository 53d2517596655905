//! Access to the data service that owns the user's scheduled workouts and
//! saved routines

use crate::routine::Routine;
use crate::workout::ScheduledWorkout;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The data service holding the scheduled workouts.  Writes always replace
/// the whole list.
pub(crate) trait WorkoutRepository {
    fn fetch(&self) -> Result<Vec<ScheduledWorkout>, RepositoryError>;

    fn replace(&self, workouts: &[ScheduledWorkout]) -> Result<(), RepositoryError>;
}

impl<T: WorkoutRepository + ?Sized> WorkoutRepository for &T {
    fn fetch(&self) -> Result<Vec<ScheduledWorkout>, RepositoryError> {
        (**self).fetch()
    }

    fn replace(&self, workouts: &[ScheduledWorkout]) -> Result<(), RepositoryError> {
        (**self).replace(workouts)
    }
}

/// A JSON array of workout records in a local file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFileRepository { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    fn tmp_path(&self) -> PathBuf {
        tmp_path(&self.path)
    }
}

impl WorkoutRepository for JsonFileRepository {
    fn fetch(&self) -> Result<Vec<ScheduledWorkout>, RepositoryError> {
        let workouts: Vec<ScheduledWorkout> = load_list(&self.path)?;
        tracing::info!(path = %self.path.display(), count = workouts.len(), "loaded workouts");
        Ok(workouts)
    }

    fn replace(&self, workouts: &[ScheduledWorkout]) -> Result<(), RepositoryError> {
        store_list(&self.path, workouts)?;
        tracing::info!(path = %self.path.display(), count = workouts.len(), "saved workouts");
        Ok(())
    }
}

/// The store of saved workout routines.  Like [`WorkoutRepository`], writes
/// replace the whole list.
pub(crate) trait RoutineRepository {
    fn fetch_routines(&self) -> Result<Vec<Routine>, RepositoryError>;

    fn replace_routines(&self, routines: &[Routine]) -> Result<(), RepositoryError>;
}

/// A JSON array of routines in a local file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonRoutineRepository {
    path: PathBuf,
}

impl JsonRoutineRepository {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonRoutineRepository { path: path.into() }
    }
}

impl RoutineRepository for JsonRoutineRepository {
    fn fetch_routines(&self) -> Result<Vec<Routine>, RepositoryError> {
        let routines: Vec<Routine> = load_list(&self.path)?;
        tracing::info!(path = %self.path.display(), count = routines.len(), "loaded routines");
        Ok(routines)
    }

    fn replace_routines(&self, routines: &[Routine]) -> Result<(), RepositoryError> {
        store_list(&self.path, routines)?;
        tracing::info!(path = %self.path.display(), count = routines.len(), "saved routines");
        Ok(())
    }
}

/// Read a JSON array from `path`.  A missing file is an empty list.
fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RepositoryError> {
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no data file yet; starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(RepositoryError::Read {
                path: path.to_owned(),
                source,
            })
        }
    };
    serde_json::from_str(&src).map_err(|source| RepositoryError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Write `items` to a temporary file beside `path` and rename it into place.
/// On failure the temporary file is removed and `path` is left as it was.
fn store_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), RepositoryError> {
    let tmp = tmp_path(path);
    let r = write_json(&tmp, items).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = r {
        if let Err(e) = fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary file");
            }
        }
        return Err(RepositoryError::Write {
            path: path.to_owned(),
            source,
        });
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let mut fp = fs::File::create(path)?;
    serde_json::to_writer_pretty(&mut fp, value)?;
    fp.write_all(b"\n")?;
    fp.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug, Error)]
pub(crate) enum RepositoryError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse records in {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
