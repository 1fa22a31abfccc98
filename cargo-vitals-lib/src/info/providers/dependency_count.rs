use crate::Result;
use crate::info::{Context, InfoProvider, Summary, Trend};
use cargo_metadata::{DependencyKind, Metadata, Node, NodeDep, PackageId};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const LOG_TARGET: &str = "      deps";

/// Counts the direct and transitive dependencies of the project package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyCount;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyCountArgs {
    /// Also count the package's dev-dependencies and what they pull in
    #[serde(default)]
    pub include_dev: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DependencyCountData {
    pub direct: u64,
    pub total: u64,
}

fn follows(dep: &NodeDep, include_dev: bool) -> bool {
    // cargo versions predating dependency kinds report none
    dep.dep_kinds.is_empty() || dep.dep_kinds.iter().any(|k| include_dev || k.kind != DependencyKind::Development)
}

/// Count the dependencies of `package` in the resolved graph of `metadata`, ignoring workspace members.
fn count(metadata: &Metadata, package: &str, include_dev: bool) -> Result<DependencyCountData> {
    let root = metadata
        .workspace_packages()
        .into_iter()
        .find(|p| p.name == package)
        .into_app_err_with(|| format!("package '{package}' is not a member of the workspace"))?;

    let resolve = metadata
        .resolve
        .as_ref()
        .into_app_err("cargo metadata did not report a dependency graph")?;

    let nodes: HashMap<&PackageId, &Node> = resolve.nodes.iter().map(|n| (&n.id, n)).collect();
    let members: HashSet<&PackageId> = metadata.workspace_members.iter().collect();

    let root_node = nodes
        .get(&root.id)
        .into_app_err_with(|| format!("package '{package}' is missing from the dependency graph"))?;

    let direct: HashSet<&PackageId> = root_node
        .deps
        .iter()
        .filter(|d| follows(d, include_dev) && !members.contains(&d.pkg))
        .map(|d| &d.pkg)
        .collect();

    // dev-dependencies of dependencies are never part of the graph, only the root's matter
    let mut visited: HashSet<&PackageId> = HashSet::new();
    let mut pending: Vec<&PackageId> = root_node.deps.iter().filter(|d| follows(d, include_dev)).map(|d| &d.pkg).collect();
    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }

        if let Some(node) = nodes.get(id) {
            pending.extend(node.deps.iter().filter(|d| follows(d, false)).map(|d| &d.pkg));
        }
    }

    let total = visited.iter().filter(|id| !members.contains(*id) && **id != &root.id).count();

    Ok(DependencyCountData {
        direct: direct.len() as u64,
        total: total as u64,
    })
}

impl InfoProvider for DependencyCount {
    type Data = DependencyCountData;
    type Args = DependencyCountArgs;

    fn identifier(&self) -> &str {
        "dependency_count"
    }

    fn extract(&self, context: &Context, args: Option<&DependencyCountArgs>) -> Result<DependencyCountData> {
        let manifest = context.workspace_root().join("Cargo.toml");
        log::debug!(target: LOG_TARGET, "Resolving dependencies of '{manifest}'");

        let mut cmd = context.toolchain().metadata_command();
        let _ = cmd.manifest_path(manifest.as_std_path());
        let metadata = cmd.exec().into_app_err_with(|| format!("running cargo metadata for '{manifest}'"))?;

        count(&metadata, &context.project().package, args.is_some_and(|a| a.include_dev))
    }

    fn summarize(&self, current: &DependencyCountData, previous: Option<&DependencyCountData>, _args: Option<&DependencyCountArgs>) -> Vec<Summary> {
        vec![
            Summary::compare(
                "direct dependencies",
                current.direct,
                previous.map(|p| p.direct),
                Trend::IncreaseIsBad,
                |v| v.to_string(),
            ),
            Summary::compare(
                "total dependencies",
                current.total,
                previous.map(|p| p.total),
                Trend::IncreaseIsBad,
                |v| v.to_string(),
            ),
        ]
    }
}
