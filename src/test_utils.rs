// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mock Kubernetes API and in-memory collaborators.

use crate::config::NamespaceScope;
use crate::error::{KgcrError, Result as KgcrResult};
use crate::kubernetes::{CrdCatalog, InstanceQuery};
use crate::types::{CrdDescriptor, CrdScope, CrdVersion, InstanceRef, Job, QueryCoordinate};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

pub const CRD_LIST_PATH: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let response = if req.method() == http::Method::GET {
            self.responses.lock().unwrap().get(req.uri().path()).cloned()
        } else {
            None
        };

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, status_json(404, "NotFound")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a Status failure response body
pub fn status_json(code: u16, reason: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("request failed: {}", reason),
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Wrap items into a list response body
pub fn list_json(api_version: &str, kind: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A CustomResourceDefinition named `<plural>.<group>`
pub fn crd_json(name: &str, scope: &str, versions: &[(&str, bool)]) -> serde_json::Value {
    let (plural, group) = name.split_once('.').unwrap();
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinition",
        "metadata": { "name": name },
        "spec": {
            "group": group,
            "names": { "kind": "Thing", "plural": plural },
            "scope": scope,
            "versions": versions
                .iter()
                .map(|(v, storage)| serde_json::json!({
                    "name": v,
                    "served": true,
                    "storage": storage
                }))
                .collect::<Vec<_>>()
        }
    })
}

pub fn instance_json(
    api_version: &str,
    kind: &str,
    name: &str,
    namespace: &str,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "name": name, "namespace": namespace }
    })
}

/// A CRD descriptor named `<plural>.<group>`
pub fn descriptor(name: &str, scope: CrdScope, versions: &[(&str, bool)]) -> CrdDescriptor {
    let (plural, group) = name.split_once('.').unwrap();
    CrdDescriptor {
        name: name.to_string(),
        group: group.to_string(),
        kind: "Thing".to_string(),
        plural: plural.to_string(),
        scope,
        versions: versions
            .iter()
            .map(|(v, storage)| CrdVersion {
                name: v.to_string(),
                storage: *storage,
            })
            .collect(),
    }
}

pub fn coordinate_job(crd_name: &str, plural: &str) -> Job {
    Job {
        crd_name: crd_name.to_string(),
        coordinate: QueryCoordinate {
            group: "example.io".to_string(),
            version: "v1".to_string(),
            plural: plural.to_string(),
            kind: "Thing".to_string(),
        },
    }
}

pub fn instance(name: &str, namespace: &str) -> InstanceRef {
    InstanceRef {
        name: name.to_string(),
        namespace: namespace.to_string(),
    }
}

pub fn api_error(code: u16, reason: &str) -> KgcrError {
    KgcrError::KubeError(kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: format!("request failed: {}", reason),
        reason: reason.to_string(),
        code,
    }))
}

/// Sleeps long enough to outlive any deadline used in tests
async fn hang() {
    tokio::time::sleep(Duration::from_secs(3600)).await
}

enum Canned<T> {
    Ok(T),
    Fail,
    Hang,
}

/// Rotates `items` left by the number of earlier calls, so consecutive calls
/// see the same items in a different order
#[derive(Default)]
struct Rotation {
    enabled: bool,
    calls: AtomicUsize,
}

impl Rotation {
    fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if self.enabled && !items.is_empty() {
            let call = self.calls.fetch_add(1, Ordering::Relaxed);
            let len = items.len();
            items.rotate_left(call % len);
        }
        items
    }
}

/// In-memory CRD catalog
pub struct StaticCatalog {
    crds: Canned<Vec<CrdDescriptor>>,
    rotation: Rotation,
}

impl StaticCatalog {
    pub fn new(crds: Vec<CrdDescriptor>) -> Self {
        Self::from_canned(Canned::Ok(crds))
    }

    pub fn failing() -> Self {
        Self::from_canned(Canned::Fail)
    }

    pub fn hanging() -> Self {
        Self::from_canned(Canned::Hang)
    }

    /// Answer every call with the CRDs in a different order
    pub fn rotating(mut self) -> Self {
        self.rotation.enabled = true;
        self
    }

    fn from_canned(crds: Canned<Vec<CrdDescriptor>>) -> Self {
        Self {
            crds,
            rotation: Rotation::default(),
        }
    }
}

#[async_trait]
impl CrdCatalog for StaticCatalog {
    async fn list_crds(&self) -> KgcrResult<Vec<CrdDescriptor>> {
        match &self.crds {
            Canned::Ok(crds) => Ok(self.rotation.apply(crds.clone())),
            Canned::Fail => Err(KgcrError::CatalogError("forbidden".to_string())),
            Canned::Hang => {
                hang().await;
                Ok(Vec::new())
            }
        }
    }
}

/// In-memory instance query keyed by plural resource name.
///
/// Unknown resources answer with a not-found error, like the API server.
#[derive(Default)]
pub struct StaticInstances {
    by_plural: HashMap<String, Canned<Vec<InstanceRef>>>,
    rotation: Rotation,
}

impl StaticInstances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plural: &str, instances: Vec<InstanceRef>) -> Self {
        self.by_plural.insert(plural.to_string(), Canned::Ok(instances));
        self
    }

    pub fn failing(mut self, plural: &str) -> Self {
        self.by_plural.insert(plural.to_string(), Canned::Fail);
        self
    }

    pub fn hanging(mut self, plural: &str) -> Self {
        self.by_plural.insert(plural.to_string(), Canned::Hang);
        self
    }

    /// Answer every call with the instances in a different order
    pub fn rotating(mut self) -> Self {
        self.rotation.enabled = true;
        self
    }
}

#[async_trait]
impl InstanceQuery for StaticInstances {
    async fn list_instances(
        &self,
        coordinate: &QueryCoordinate,
        scope: &NamespaceScope,
    ) -> KgcrResult<Vec<InstanceRef>> {
        match self.by_plural.get(&coordinate.plural) {
            Some(Canned::Ok(instances)) => Ok(self.rotation.apply(
                instances
                    .iter()
                    .filter(|i| scope.namespace().map_or(true, |ns| i.namespace == ns))
                    .cloned()
                    .collect(),
            )),
            Some(Canned::Hang) => {
                hang().await;
                Ok(Vec::new())
            }
            Some(Canned::Fail) => Err(api_error(403, "Forbidden")),
            None => Err(api_error(404, "NotFound")),
        }
    }
}
