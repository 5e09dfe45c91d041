//! The `categories` command

use annocmp_core::{Category, KeywordRule, PartitionStrategy, Taxonomy};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::resolve_config;

#[derive(Serialize)]
struct CategoryListing<'a> {
  priority: usize,
  rule: &'a KeywordRule,
  categories: Vec<CategoryInfo>,
}

#[derive(Serialize)]
struct CategoryInfo {
  category: Category,
  label: &'static str,
  in_aggregate: bool,
}

fn listings(taxonomy: &Taxonomy) -> Vec<CategoryListing<'_>> {
  taxonomy
    .rules()
    .iter()
    .enumerate()
    .map(|(idx, rule)| CategoryListing {
      priority: idx + 1,
      rule,
      categories: rule
        .target
        .categories()
        .into_iter()
        .map(|category| CategoryInfo {
          category,
          label: category.label(),
          in_aggregate: category.in_aggregate(),
        })
        .collect(),
    })
    .collect()
}

fn describe_include(include: &[&[&str]]) -> String {
  include
    .iter()
    .map(|group| group.iter().map(|kw| format!("{kw:?}")).collect::<Vec<_>>().join(" | "))
    .map(|group| format!("({group})"))
    .collect::<Vec<_>>()
    .join(" & ")
}

fn header(rule_count: usize, strategy: PartitionStrategy) -> String {
  let how = match strategy {
    PartitionStrategy::Independent => "each rule filters every line",
    PartitionStrategy::FirstMatch => "first match wins",
  };
  format!("Categories ({rule_count} rules, {how})")
}

/// List the taxonomy in priority order
pub fn cmd_categories(json: bool, config_path: Option<&Path>) -> Result<()> {
  let config = resolve_config(config_path)?;
  let taxonomy = Taxonomy::standard();
  let listings = listings(&taxonomy);

  if json {
    println!("{}", serde_json::to_string_pretty(&listings)?);
    return Ok(());
  }

  let title = header(listings.len(), config.classification.strategy);
  println!("{title}");
  println!("{}\n", "=".repeat(title.len()));

  for listing in &listings {
    let rule = listing.rule;
    println!("{}. {}", listing.priority, rule.name);
    for info in &listing.categories {
      let aggregate = if info.in_aggregate { "" } else { " (not in aggregate)" };
      println!("   -> {} [{}]{}", info.label, info.category, aggregate);
    }
    println!("   include: {}", describe_include(rule.include));
    if !rule.exclude.is_empty() {
      let excluded: Vec<String> = rule.exclude.iter().map(|kw| format!("{kw:?}")).collect();
      println!("   exclude: {}", excluded.join(", "));
    }
    println!();
  }

  Ok(())
}
