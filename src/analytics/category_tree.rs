// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Hierarchical category forest: build from flat records, flatten back with
//! depth and a `"Parent > Child"` qualified name.

use std::collections::{HashMap, HashSet};

use crate::error::{ReportError, ReportResult};
use crate::models::{Category, CategoryNode, FlatCategory};

pub const NAME_SEPARATOR: &str = " > ";

/// Builds the category forest in two passes: index every record by id, then
/// attach each record to its parent when the parent is part of the input.
///
/// Records whose parent is missing (deactivated or filtered out) become roots.
/// Roots and children keep first-seen input order. A repeated id keeps its
/// first occurrence. Records that cannot be reached from any root sit on a
/// parent cycle and fail the build with [`ReportError::CycleDetected`].
pub fn build_category_tree(categories: &[Category]) -> ReportResult<Vec<CategoryNode>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(categories.len());
    let mut unique: Vec<&Category> = Vec::with_capacity(categories.len());
    for cat in categories {
        if !index.contains_key(cat.id.as_str()) {
            index.insert(cat.id.as_str(), unique.len());
            unique.push(cat);
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); unique.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (pos, cat) in unique.iter().enumerate() {
        match cat.parent_id.as_deref().and_then(|p| index.get(p)) {
            Some(&parent) => children[parent].push(pos),
            None => roots.push(pos),
        }
    }

    let limit = unique.len();
    let mut attached = vec![false; unique.len()];
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        forest.push(attach(root, 0, limit, &unique, &children, &mut attached)?);
    }

    if let Some(pos) = attached.iter().position(|seen| !seen) {
        return Err(ReportError::CycleDetected {
            id: unique[pos].id.clone(),
        });
    }
    Ok(forest)
}

fn attach(
    pos: usize,
    depth: usize,
    limit: usize,
    cats: &[&Category],
    children: &[Vec<usize>],
    attached: &mut [bool],
) -> ReportResult<CategoryNode> {
    if depth > limit || attached[pos] {
        return Err(ReportError::CycleDetected {
            id: cats[pos].id.clone(),
        });
    }
    attached[pos] = true;
    let mut node = CategoryNode {
        category: cats[pos].clone(),
        children: Vec::with_capacity(children[pos].len()),
    };
    for &child in &children[pos] {
        node.children
            .push(attach(child, depth + 1, limit, cats, children, attached)?);
    }
    Ok(node)
}

/// Depth-first pre-order listing of a forest.
///
/// Fails with [`ReportError::CycleDetected`] if an id shows up twice or the
/// nesting goes deeper than the number of nodes in the forest.
pub fn flatten_category_tree(forest: &[CategoryNode]) -> ReportResult<Vec<FlatCategory>> {
    let limit = count_nodes(forest);
    let mut seen: HashSet<&str> = HashSet::with_capacity(limit);
    let mut out = Vec::with_capacity(limit);
    for root in forest {
        walk(root, 0, "", limit, &mut seen, &mut out)?;
    }
    Ok(out)
}

fn count_nodes(forest: &[CategoryNode]) -> usize {
    forest
        .iter()
        .map(|n| 1 + count_nodes(&n.children))
        .sum()
}

fn walk<'a>(
    node: &'a CategoryNode,
    depth: usize,
    prefix: &str,
    limit: usize,
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<FlatCategory>,
) -> ReportResult<()> {
    if depth >= limit || !seen.insert(node.category.id.as_str()) {
        return Err(ReportError::CycleDetected {
            id: node.category.id.clone(),
        });
    }
    let qualified_name = format!("{}{}", prefix, node.category.name);
    let child_prefix = format!("{}{}", qualified_name, NAME_SEPARATOR);
    out.push(FlatCategory {
        category: node.category.clone(),
        depth,
        qualified_name,
    });
    for child in &node.children {
        walk(child, depth + 1, &child_prefix, limit, seen, out)?;
    }
    Ok(())
}

/// Build and flatten in one step.
pub fn category_tree_flat(categories: &[Category]) -> ReportResult<Vec<FlatCategory>> {
    let forest = build_category_tree(categories)?;
    flatten_category_tree(&forest)
}

/// Ids of records that would make [`build_category_tree`] fail, in input order.
pub fn cyclic_category_ids(categories: &[Category]) -> Vec<String> {
    let by_id: HashMap<&str, &Category> = categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let mut out = Vec::new();
    for cat in categories {
        let mut hops = 0usize;
        let mut cur = cat.parent_id.as_deref();
        let mut cyclic = false;
        while let Some(pid) = cur {
            let Some(parent) = by_id.get(pid) else { break };
            hops += 1;
            if parent.id == cat.id || hops > categories.len() {
                cyclic = true;
                break;
            }
            cur = parent.parent_id.as_deref();
        }
        if cyclic && !out.contains(&cat.id) {
            out.push(cat.id.clone());
        }
    }
    out
}
