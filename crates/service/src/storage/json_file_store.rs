use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use models::{CollectionPoint, PointsDocument};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{PointStore, StoreError};
use crate::metrics;

/// JSON file-backed point store.
///
/// Persists `{ "points": [...] }` to a single file. Reads go to disk every time.
/// An append runs load, push, temp write, fsync and rename as one blocking job
/// that owns the write lock, so the lock is only released once the job has
/// finished, even when the caller already gave up on it.
pub struct JsonFileStore {
    file_path: PathBuf,
    io_timeout: Duration,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open the store at `path`, bootstrapping an empty document if none exists.
    /// Existing content is never overwritten.
    pub async fn open<P: Into<PathBuf>>(path: P, io_timeout: Duration) -> Result<Arc<Self>, StoreError> {
        let store = Self {
            file_path: path.into(),
            io_timeout,
            write_lock: Arc::new(Mutex::new(())),
        };
        let path = store.file_path.clone();
        if store.run_blocking("bootstrap", move || bootstrap(&path)).await? {
            info!(path = %store.file_path.display(), "initialized empty points store");
        }
        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Run `job` on the blocking pool, waiting at most `io_timeout` for it.
    /// On timeout the job keeps running to completion in the background.
    async fn run_blocking<T, F>(&self, op: &'static str, job: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(job);
        match tokio::time::timeout(self.io_timeout, handle).await {
            Ok(Ok(res)) => res,
            Ok(Err(join)) => Err(StoreError::Io {
                path: self.file_path.clone(),
                source: io::Error::other(join.to_string()),
            }),
            Err(_) => Err(StoreError::Timeout { op, timeout: self.io_timeout }),
        }
    }
}

fn io_err(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io { path: path.to_path_buf(), source }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points.json".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
}

/// Create the empty document unless one exists. Returns whether it was created.
fn bootstrap(path: &Path) -> Result<bool, StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
        }
    }
    if path.exists() {
        return Ok(false);
    }

    // 先写临时文件，再用 hard_link 原子地"仅在不存在时"落地，避免覆盖已有数据
    let tmp = write_temp(path, &PointsDocument::default())?;
    let linked = fs::hard_link(&tmp, path);
    let _ = fs::remove_file(&tmp);
    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

fn read_document(path: &Path) -> Result<PointsDocument, StoreError> {
    let bytes = fs::read(path).map_err(|e| io_err(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `doc` into a fresh temp file next to `path` and fsync it.
fn write_temp(path: &Path, doc: &PointsDocument) -> Result<PathBuf, StoreError> {
    let data = serde_json::to_vec_pretty(doc).map_err(StoreError::Encode)?;
    let tmp = temp_path(path);
    let res = File::create(&tmp).and_then(|mut file| {
        file.write_all(&data)?;
        file.sync_all()
    });
    if let Err(e) = res {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(tmp)
}

fn commit(path: &Path, doc: &PointsDocument) -> Result<(), StoreError> {
    let tmp = write_temp(path, doc)?;
    if let Err(e) = fs::rename(&tmp, path) {
        warn!(tmp = %tmp.display(), error = %e, "commit rename failed");
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Load, push and commit. Returns the new collection size.
fn append_to_document(path: &Path, point: CollectionPoint) -> Result<usize, StoreError> {
    let mut doc = read_document(path)?;
    doc.points.push(point);
    commit(path, &doc)?;
    Ok(doc.points.len())
}

#[async_trait]
impl PointStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<CollectionPoint>, StoreError> {
        let path = self.file_path.clone();
        let res = self.run_blocking("read", move || read_document(&path)).await;
        if res.is_err() {
            metrics::STORE_ERRORS_TOTAL.with_label_values(&["load"]).inc();
        }
        Ok(res?.points)
    }

    async fn append_one(&self, point: CollectionPoint) -> Result<(), StoreError> {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let started = Instant::now();
        let id = point.id;
        let path = self.file_path.clone();

        let res = self
            .run_blocking("append", move || {
                // 锁随任务一起释放：调用方超时返回后，其它写入仍需等待本次提交结束
                let _guard = guard;
                append_to_document(&path, point)
            })
            .await;

        match res {
            Ok(total) => {
                let elapsed = started.elapsed();
                metrics::STORE_COMMIT_DURATION.observe(elapsed.as_secs_f64());
                debug!(%id, total, elapsed_ms = elapsed.as_millis() as u64, "point appended");
                Ok(())
            }
            Err(e) => {
                metrics::STORE_ERRORS_TOTAL.with_label_values(&["append"]).inc();
                Err(e)
            }
        }
    }
}
