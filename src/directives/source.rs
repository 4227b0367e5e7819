//! Identity of the resource that owns a string map.

use std::fmt;

/// Kind of resource an annotation or data bag came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ConfigMap,
    Ingress,
    Other(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for ResourceKind {
    fn from(kind: &str) -> Self {
        match kind {
            "ConfigMap" => ResourceKind::ConfigMap,
            "Ingress" => ResourceKind::Ingress,
            other => ResourceKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owning resource of a string map, used only to attribute errors.
///
/// Displays as `<Kind> <Namespace>/<Name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationSource {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl AnnotationSource {
    pub fn new(
        kind: impl Into<ResourceKind>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn config_map(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ResourceKind::ConfigMap, namespace, name)
    }

    pub fn ingress(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Ingress, namespace, name)
    }
}

impl fmt::Display for AnnotationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}
