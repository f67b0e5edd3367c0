// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig utilities

use crate::config::ClusterOptions;
use crate::constants::timeouts::{CONNECT_TIMEOUT, READ_TIMEOUT};
use crate::error::{KgcrError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// A connected client together with the kubeconfig context it came from
pub struct ClusterConnection {
    pub client: Client,
    pub context: String,
    /// Namespace configured on the context, if any
    pub context_namespace: Option<String>,
}

/// Load the kubeconfig, select a context and create a client for it
#[instrument(skip(options))]
pub async fn connect(options: &ClusterOptions) -> Result<ClusterConnection> {
    let kubeconfig = load_kubeconfig(options)?;

    let context = select_context(&kubeconfig, options.context.as_deref())?;
    let context_namespace = context_namespace(&kubeconfig, &context);
    info!("Using context: {}", context);

    let mut client_config = KConfig::from_custom_kubeconfig(
        kubeconfig,
        &KubeConfigOptions {
            context: Some(context.clone()),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| KgcrError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    apply_timeouts(&mut client_config);
    debug!("Cluster URL: {}", client_config.cluster_url);

    let client = Client::try_from(client_config)
        .map_err(|e| KgcrError::KubeconfigError(format!("Failed to create client: {}", e)))?;

    Ok(ClusterConnection {
        client,
        context,
        context_namespace,
    })
}

/// Bound connecting to and reading from the API server
fn apply_timeouts(config: &mut KConfig) {
    config.connect_timeout = Some(CONNECT_TIMEOUT);
    config.read_timeout = Some(READ_TIMEOUT);
}

fn load_kubeconfig(options: &ClusterOptions) -> Result<Kubeconfig> {
    match &options.kubeconfig {
        Some(path) => Kubeconfig::read_from(path).map_err(|e| {
            KgcrError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
        }),
        None => Kubeconfig::read().map_err(|e| KgcrError::KubeconfigError(e.to_string())),
    }
}

/// Pick the requested context, or the kubeconfig's current context
fn select_context(kubeconfig: &Kubeconfig, requested: Option<&str>) -> Result<String> {
    let Some(name) = requested
        .map(str::to_string)
        .or_else(|| kubeconfig.current_context.clone())
        .filter(|name| !name.is_empty())
    else {
        return Err(KgcrError::KubeconfigError(
            "No context specified and no current context in kubeconfig".to_string(),
        ));
    };

    if !kubeconfig.contexts.iter().any(|c| c.name == name) {
        return Err(KgcrError::KubeconfigError(format!(
            "Context '{}' not found in kubeconfig",
            name
        )));
    }

    Ok(name)
}

/// The default namespace configured on a kubeconfig context
fn context_namespace(kubeconfig: &Kubeconfig, context: &str) -> Option<String> {
    kubeconfig
        .contexts
        .iter()
        .find(|c| c.name == context)
        .and_then(|c| c.context.as_ref())
        .and_then(|c| c.namespace.clone())
        .filter(|ns| !ns.is_empty())
}
