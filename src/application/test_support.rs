//! In-memory ports and fixtures shared by the application tests

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::{
    ArtifactSet, CanonicalTemplate, CanonicalTemplates, Lockfile, ModuleDescriptor, Registry,
};
use crate::domain::ports::{ArtifactSink, FsResult, LockfileRepository, LockfileResult};
use crate::domain::services::{Generator, Layout, RuleFactory, SourceTokens, TargetFileState};
use crate::domain::value_objects::{ContentHash, Operation, Palette};

pub const TEMPLATE: &str =
    "<h1 class=\"text-primary\"><i class=\"fas fa-eye\"></i> Oftalmología</h1>\n";

#[derive(Default)]
pub struct MemoryLockfile {
    pub lockfile: RefCell<Lockfile>,
    pub saves: Cell<usize>,
}

impl MemoryLockfile {
    pub fn get(&self) -> Lockfile {
        self.lockfile.borrow().clone()
    }
}

impl LockfileRepository for MemoryLockfile {
    fn load(&self, _path: &Path) -> LockfileResult<Lockfile> {
        Ok(self.lockfile.borrow().clone())
    }

    fn save(&self, lockfile: &Lockfile, _path: &Path) -> LockfileResult<()> {
        *self.lockfile.borrow_mut() = lockfile.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub files: RefCell<BTreeMap<PathBuf, String>>,
    pub writes: Cell<usize>,
}

impl MemorySink {
    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }

    /// Change a file behind the generator's back
    pub fn edit(&self, path: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
    }

    pub fn delete(&self, path: &str) {
        self.files.borrow_mut().remove(Path::new(path));
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn state(&self, path: &Path) -> TargetFileState {
        match self.files.borrow().get(path) {
            Some(content) => TargetFileState::exists_with_hash(ContentHash::of(content)),
            None => TargetFileState::not_exists(),
        }
    }

    fn read(&self, path: &Path) -> FsResult<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.files.borrow_mut().remove(path);
        Ok(())
    }
}

pub fn dental() -> ModuleDescriptor {
    ModuleDescriptor::new("dental", "Dental")
        .with_icon("fas fa-tooth")
        .with_color("info")
        .with_capabilities([Operation::Dashboard, Operation::List])
}

pub fn farmacia() -> ModuleDescriptor {
    ModuleDescriptor::new("farmacia", "Farmacia")
        .with_icon("fas fa-pills")
        .with_color("success")
        .with_capabilities([Operation::Dashboard])
}

pub fn registry(modules: Vec<ModuleDescriptor>) -> Registry {
    let template = CanonicalTemplate::parse(TEMPLATE).unwrap();
    let mut registry = Registry::new(Palette::bootstrap(), CanonicalTemplates::new(template));
    registry.register_all(modules).unwrap();
    registry
}

pub fn generator() -> Generator {
    Generator::from_factory(&RuleFactory::new(SourceTokens {
        title: "Oftalmología".to_string(),
        icon: "fas fa-eye".to_string(),
        color: "primary".to_string(),
        description: String::new(),
    }))
    .unwrap()
}

pub fn artifacts(modules: Vec<ModuleDescriptor>) -> ArtifactSet {
    generator().generate(&registry(modules)).unwrap()
}

pub fn layout() -> Layout {
    Layout::new("{key}/{role}.html").unwrap()
}
