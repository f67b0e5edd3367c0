// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rendering scan results as a kubectl-style table

use crate::config::NamespaceScope;
use crate::types::FoundResource;
use comfy_table::{presets::NOTHING, Table};

pub const NO_NAMESPACED_CRDS: &str = "No namespaced custom resources found in cluster";

/// Message printed instead of an empty table
pub fn no_resources_message(scope: &NamespaceScope) -> String {
    match scope {
        NamespaceScope::Single(ns) => format!("No custom resources found in namespace: {}", ns),
        NamespaceScope::All => "No custom resources found in any namespace".to_string(),
    }
}

/// Render results in their given order; the namespace column only appears
/// when scanning all namespaces.
pub fn render(resources: &[FoundResource], scope: &NamespaceScope) -> String {
    if resources.is_empty() {
        return no_resources_message(scope);
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);

    if scope.is_all() {
        table.set_header(vec!["NAMESPACE", "CRD", "RESOURCE", "NAME"]);
        for r in resources {
            table.add_row(vec![
                &r.namespace,
                &r.crd_name,
                &r.resource_name,
                &r.instance_name,
            ]);
        }
    } else {
        table.set_header(vec!["CRD", "RESOURCE", "NAME"]);
        for r in resources {
            table.add_row(vec![&r.crd_name, &r.resource_name, &r.instance_name]);
        }
    }

    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }

    table.trim_fmt()
}
