// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::category_tree::{
    build_category_tree, cyclic_category_ids, flatten_category_tree,
};
use crate::error::ReportError;
use crate::models::{CategoryKind, FlatCategory};
use crate::queries;
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Category name must not be empty"));
            }
            let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let parent = match sub.get_one::<String>("parent") {
                Some(p) => Some(id_for_category(conn, p, kind)?),
                None => None,
            };
            match queries::find_category(conn, name, kind)? {
                Some(c) if c.active => {
                    return Err(anyhow!("{} category '{}' already exists", kind, name));
                }
                Some(c) => {
                    queries::reactivate_category(conn, &c.id, parent.as_deref())?;
                    println!("Reactivated {} category '{}'", kind, name);
                }
                None => {
                    queries::insert_category(conn, name, kind, parent.as_deref())?;
                    println!("Added {} category '{}'", kind, name);
                }
            }
        }
        Some(("list", sub)) => {
            let rows = flat_categories(conn, kind_arg(sub)?)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let data = rows
                    .into_iter()
                    .map(|f| {
                        vec![
                            f.qualified_name,
                            f.category.kind.to_string(),
                            f.depth.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Kind", "Level"], data));
            }
        }
        Some(("tree", sub)) => {
            for f in flat_categories(conn, kind_arg(sub)?)? {
                println!(
                    "{}{} ({})",
                    "  ".repeat(f.depth),
                    f.category.name,
                    f.category.kind
                );
            }
        }
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("deactivate", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let id = id_for_category(conn, name, kind)?;
            queries::deactivate_category(conn, &id)?;
            println!("Deactivated {} category '{}'", kind, name.trim());
        }
        _ => {}
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let id = id_for_category(conn, name, kind)?;
    let mut cats = queries::list_categories(conn, Some(kind), false)?;
    let Some(target) = cats.iter_mut().find(|c| c.id == id) else {
        return Err(anyhow!("{} category '{}' not found", kind, name));
    };

    if let Some(new_name) = sub.get_one::<String>("rename") {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(anyhow!("Category name must not be empty"));
        }
        if new_name != target.name {
            if let Some(other) = queries::find_category(conn, new_name, kind)? {
                let state = if other.active { "" } else { " (inactive)" };
                return Err(anyhow!(
                    "{} category '{}'{} already exists",
                    kind,
                    new_name,
                    state
                ));
            }
        }
        target.name = new_name.to_string();
    }
    if sub.get_flag("no-parent") {
        target.parent_id = None;
    } else if let Some(p) = sub.get_one::<String>("parent") {
        let parent_id = id_for_category(conn, p, kind)?;
        if parent_id == id {
            return Err(anyhow!("Category '{}' cannot be its own parent", name));
        }
        target.parent_id = Some(parent_id);
    }

    let (new_name, parent_id) = (target.name.clone(), target.parent_id.clone());
    if cyclic_category_ids(&cats).contains(&id) {
        return Err(ReportError::CycleDetected { id }.into());
    }
    queries::update_category(conn, &id, &new_name, parent_id.as_deref())?;
    println!("Updated {} category '{}'", kind, new_name);
    Ok(())
}

fn kind_arg(sub: &clap::ArgMatches) -> Result<Option<CategoryKind>> {
    sub.get_one::<String>("kind").map(|k| k.parse()).transpose()
}

/// Active categories as a flattened tree. Children of deactivated parents show
/// up as roots.
pub fn flat_categories(conn: &Connection, kind: Option<CategoryKind>) -> Result<Vec<FlatCategory>> {
    let cats = queries::list_categories(conn, kind, false)?;
    let forest = build_category_tree(&cats)?;
    Ok(flatten_category_tree(&forest)?)
}
