//! Generated artifacts and view bindings
//!
//! Everything here is derived data: recomputed from the registry on every
//! run and never edited in place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::value_objects::{ContentHash, Guard, Operation};

/// Operation × guard × template context for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationBinding {
    pub operation: Operation,
    pub guard: Guard,
    pub context: BTreeMap<String, String>,
}

/// Route/view metadata handed to an external router
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    pub module_key: String,
    pub operation: Operation,
    pub url_path_suffix: &'static str,
    /// `<module_key>:<role>`, unique across the route table
    pub route_name: String,
    pub template: String,
    pub guard: Guard,
    pub context: BTreeMap<String, String>,
}

impl RouteBinding {
    /// Full URL path under the module prefix: `/<key>/<suffix>`
    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.module_key, self.url_path_suffix)
    }
}

/// One rendered template plus its binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    module_key: String,
    binding: OperationBinding,
    content: String,
    hash: ContentHash,
    unmatched: Vec<String>,
}

impl GeneratedArtifact {
    pub fn new(
        module_key: impl Into<String>,
        binding: OperationBinding,
        content: String,
        unmatched: Vec<String>,
    ) -> Self {
        let hash = ContentHash::of(&content);
        Self {
            module_key: module_key.into(),
            binding,
            content,
            hash,
            unmatched,
        }
    }

    pub fn module_key(&self) -> &str {
        &self.module_key
    }

    pub fn operation(&self) -> Operation {
        self.binding.operation
    }

    pub fn binding(&self) -> &OperationBinding {
        &self.binding
    }

    /// Rendered template body
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Placeholders that matched nothing while rendering this artifact
    pub fn unmatched_placeholders(&self) -> &[String] {
        &self.unmatched
    }

    /// Template path in Django's app-namespaced form: `<key>/<role>.html`
    pub fn template_name(&self) -> String {
        format!("{}/{}.html", self.module_key, self.binding.operation.role())
    }

    pub fn route(&self) -> RouteBinding {
        let op = self.binding.operation;
        RouteBinding {
            module_key: self.module_key.clone(),
            operation: op,
            url_path_suffix: op.url_path_suffix(),
            route_name: format!("{}:{}", self.module_key, op.role()),
            template: self.template_name(),
            guard: self.binding.guard,
            context: self.binding.context.clone(),
        }
    }
}

/// Ordered output of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSet {
    pub fn new(artifacts: Vec<GeneratedArtifact>) -> Self {
        Self { artifacts }
    }

    /// Artifacts in registration × canonical operation order
    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        &self.artifacts
    }

    pub fn get(&self, module_key: &str, op: Operation) -> Option<&GeneratedArtifact> {
        self.artifacts
            .iter()
            .find(|a| a.module_key() == module_key && a.operation() == op)
    }

    pub fn for_module<'a>(
        &'a self,
        module_key: &'a str,
    ) -> impl Iterator<Item = &'a GeneratedArtifact> + 'a {
        self.artifacts
            .iter()
            .filter(move |a| a.module_key() == module_key)
    }

    /// Route table in artifact order
    pub fn routes(&self) -> Vec<RouteBinding> {
        self.artifacts.iter().map(GeneratedArtifact::route).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for ArtifactSet {
    type Item = GeneratedArtifact;
    type IntoIter = std::vec::IntoIter<GeneratedArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}
