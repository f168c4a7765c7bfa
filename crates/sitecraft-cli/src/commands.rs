use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::{Attribute, Cell, Table};
use serde_json::Value;
use sitecraft_config::{
    CheckoutRequest, ConfigPatch, ConfigStorage, HeroType, STORAGE_KEY, parse_path,
};
use sitecraft_events::DispatchReport;
use sitecraft_tier::{FeatureKey, Tier, has_feature, missing_features};
use tracing::{info, warn};

use crate::output::{
    apply_table_style, check_cell, describe_pass, dim_cell, flatten_json, key_value_table,
};
use sitecraft_cli::settings::Settings;
use sitecraft_cli::studio::Studio;

pub fn run_show<S: ConfigStorage>(studio: &Studio<S>, json: bool) -> Result<()> {
    let config = studio.config();
    if json {
        let text = serde_json::to_string_pretty(config).context("serialize configuration")?;
        println!("{text}");
        return Ok(());
    }
    let value = serde_json::to_value(config).context("serialize configuration")?;
    let mut table = key_value_table(["Path", "Value"]);
    for (path, rendered) in flatten_json(&value) {
        let cell = if rendered == "null" {
            dim_cell("(package default)")
        } else {
            Cell::new(rendered)
        };
        table.add_row(vec![Cell::new(path), cell]);
    }
    println!("{table}");
    println!("Tier: {}", studio.tier(None));
    if !studio.store().persistence_healthy() {
        println!("Warning: the last write to storage failed; changes may not survive a restart.");
    }
    Ok(())
}

pub fn run_set<S: ConfigStorage>(studio: &mut Studio<S>, path: &str, raw: &str) -> Result<()> {
    let segments = parse_path(path);
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    let report = studio
        .store_mut()
        .update_path(&segments, value)
        .with_context(|| format!("set {path}"))?;
    info!(path, "configuration value set");
    finish_update(studio, report);
    Ok(())
}

pub fn run_patch<S: ConfigStorage>(studio: &mut Studio<S>, json: &str) -> Result<()> {
    let patch: ConfigPatch = serde_json::from_str(json).context("parse configuration patch")?;
    if patch.is_empty() {
        bail!("patch names no sections");
    }
    let sections = patch.sections().join(", ");
    let report = studio.store_mut().update_config(patch);
    info!(%sections, "configuration sections replaced");
    finish_update(studio, report);
    Ok(())
}

pub fn run_reset<S: ConfigStorage>(studio: &mut Studio<S>) -> Result<()> {
    let report = studio.store_mut().reset_to_defaults();
    info!(key = STORAGE_KEY, "configuration reset to defaults");
    finish_update(studio, report);
    Ok(())
}

fn finish_update<S: ConfigStorage>(studio: &Studio<S>, report: DispatchReport) {
    if !report.is_clean() {
        warn!(failed = report.failed, "some configuration listeners failed");
    }
    match studio.settle() {
        Some(pass) => println!("{}", describe_pass(&pass)),
        None => println!("styles unchanged"),
    }
    if !studio.store().persistence_healthy() {
        eprintln!("warning: the configuration could not be written to storage");
    }
}

pub fn run_styles<S: ConfigStorage>(
    studio: &Studio<S>,
    json: bool,
    prefix: Option<&str>,
) -> Result<()> {
    let snapshot = studio.snapshot();
    let prefix = prefix.unwrap_or("");
    if json {
        let rendered = if prefix.is_empty() {
            serde_json::to_string_pretty(&snapshot)
        } else {
            let filtered: BTreeMap<&str, &str> = snapshot.with_prefix(prefix).collect();
            serde_json::to_string_pretty(&filtered)
        };
        let text = rendered.context("serialize styles")?;
        println!("{text}");
        return Ok(());
    }

    let mut table = key_value_table(["Name", "Value"]);
    if prefix.is_empty() {
        for (name, value) in &snapshot.markers {
            table.add_row(vec![
                Cell::new(format!("[{name}]")).add_attribute(Attribute::Bold),
                Cell::new(value),
            ]);
        }
    }
    for (name, value) in snapshot.with_prefix(prefix) {
        table.add_row(vec![name, value]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_features<S: ConfigStorage>(
    studio: &Studio<S>,
    tier_override: Option<Tier>,
    missing: bool,
) -> Result<()> {
    let tier = studio.tier(tier_override);
    let keys = if missing {
        missing_features(tier)
    } else {
        FeatureKey::ALL.to_vec()
    };
    println!("Tier: {tier}");
    if keys.is_empty() {
        println!("{tier} includes every feature.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Feature", "Included"]);
    apply_table_style(&mut table);
    for key in keys {
        table.add_row(vec![Cell::new(key), check_cell(has_feature(tier, key))]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_nav<S: ConfigStorage>(
    studio: &Studio<S>,
    tier_override: Option<Tier>,
    hero: Option<HeroType>,
    json: bool,
) -> Result<()> {
    let items = studio.navigation(tier_override, hero);
    if json {
        let text = serde_json::to_string_pretty(&items).context("serialize navigation")?;
        println!("{text}");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Item", "Link", "Dropdown"]);
    apply_table_style(&mut table);
    for item in &items {
        let dropdown = if item.has_dropdown {
            let links: Vec<String> = item
                .dropdown
                .iter()
                .map(|entry| format!("{} ({})", entry.label, entry.href))
                .collect();
            Cell::new(links.join("\n"))
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(&item.label), Cell::new(&item.href), dropdown]);
    }
    println!("Tier: {}", studio.tier(tier_override));
    println!("{table}");
    Ok(())
}

pub fn run_checkout<S: ConfigStorage>(
    studio: &Studio<S>,
    success_url: &str,
    cancel_url: &str,
) -> Result<()> {
    let request = CheckoutRequest::new(studio.config(), success_url, cancel_url);
    let body = request.to_json().context("build checkout request")?;
    println!("{body}");
    Ok(())
}

pub fn run_settings(settings: &Settings, path: &Path, write: bool) -> Result<()> {
    if write {
        settings.save_to(path)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }
    let text = toml::to_string_pretty(settings).context("serialize settings")?;
    println!("# {}", path.display());
    print!("{text}");
    Ok(())
}
