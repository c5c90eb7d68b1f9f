//! Shared fakes and fixtures for reconciliation tests.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use librarian::reload::ProxyReloader;
use librarian::workload::{ContainerRuntime, RuntimeError, WorkloadRecord};
use librarian::{Reconciler, Settings};
use tempfile::TempDir;

/// In-memory container runtime recording every call.
#[derive(Default)]
pub struct FakeRuntime {
    running: Mutex<BTreeMap<String, WorkloadRecord>>,
    launches: AtomicUsize,
    failing: Mutex<BTreeSet<String>>,
}

#[allow(dead_code)]
impl FakeRuntime {
    /// Make launches of `identity` fail.
    pub fn fail_launch(&self, identity: &str) {
        self.failing.lock().unwrap().insert(identity.to_string());
    }

    pub fn running(&self) -> Vec<String> {
        self.running.lock().unwrap().keys().cloned().collect()
    }

    pub fn record(&self, identity: &str) -> Option<WorkloadRecord> {
        self.running.lock().unwrap().get(identity).cloned()
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    /// Pretend a workload exists that no route points at yet.
    pub fn seed(&self, record: WorkloadRecord) {
        self.running.lock().unwrap().insert(record.identity.clone(), record);
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn remove(&self, identity: &str) -> Result<(), RuntimeError> {
        self.running.lock().unwrap().remove(identity);
        Ok(())
    }

    async fn run(&self, record: &WorkloadRecord) -> Result<(), RuntimeError> {
        if self.failing.lock().unwrap().contains(&record.identity) {
            return Err(RuntimeError(format!("pull access denied for {}", record.image)));
        }
        let mut running = self.running.lock().unwrap();
        if running.contains_key(&record.identity) {
            return Err(RuntimeError(format!("name {} is already in use", record.identity)));
        }
        running.insert(record.identity.clone(), record.clone());
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeReloader {
    reloads: AtomicUsize,
    fail: Mutex<bool>,
}

#[allow(dead_code)]
impl FakeReloader {
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl ProxyReloader for FakeReloader {
    async fn reload(&self) -> Result<(), RuntimeError> {
        if *self.fail.lock().unwrap() {
            return Err(RuntimeError("No such container: ng-gatekeeper".into()));
        }
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Scratch content/spaces/routing layout wired to fakes.
pub struct Fixture {
    _dir: TempDir,
    pub settings: Arc<Settings>,
    pub runtime: Arc<FakeRuntime>,
    pub reloader: Arc<FakeReloader>,
    pub reconciler: Reconciler,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.paths.content_root = dir.path().join("content");
        settings.paths.spaces_root = dir.path().join("spaces");
        settings.paths.routing_dir = dir.path().join("conf.d");
        settings.paths.host_root = PathBuf::from("/srv/brain");

        fs::create_dir_all(&settings.paths.content_root).unwrap();
        fs::create_dir_all(&settings.paths.spaces_root).unwrap();
        fs::create_dir_all(&settings.paths.routing_dir).unwrap();
        for dir_name in ["notes", "projects", ".git"] {
            fs::create_dir_all(settings.paths.content_root.join(dir_name)).unwrap();
        }
        fs::write(settings.paths.content_root.join("todo.md"), "- [ ] things").unwrap();

        let settings = Arc::new(settings);
        let runtime = Arc::new(FakeRuntime::default());
        let reloader = Arc::new(FakeReloader::default());
        let reconciler = Reconciler::new(settings.clone(), runtime.clone(), reloader.clone());

        Self {
            _dir: dir,
            settings,
            runtime,
            reloader,
            reconciler,
        }
    }

    pub fn write_document(&self, yaml: &str) {
        fs::write(self.settings.paths.document_path(), yaml).unwrap();
    }

    pub fn space(&self, tenant: &str) -> PathBuf {
        self.settings.paths.spaces_root.join(tenant)
    }

    pub fn route_file(&self, tenant: &str) -> PathBuf {
        self.settings.paths.routing_dir.join(format!("space-{tenant}.conf"))
    }

    /// Sorted entry names of `dir`.
    pub fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Space entries with their link targets.
    pub fn links(&self, tenant: &str) -> Vec<(String, PathBuf)> {
        Self::entries(&self.space(tenant))
            .into_iter()
            .map(|name| {
                let target = fs::read_link(self.space(tenant).join(&name)).unwrap();
                (name, target)
            })
            .collect()
    }

    pub fn route_files(&self) -> Vec<String> {
        Self::entries(&self.settings.paths.routing_dir)
    }
}
