//! Subcommand handlers. Each prints one JSON document (or the rendered
//! catalog) to stdout.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use vetdir_core::{CityProfile, District};
use vetdir_extract::{
    cards_for_utterance, load_catalog, parse_places, process_reply_for, render_catalog,
    to_embed_url, DistrictResolver,
};

#[derive(Debug, Serialize)]
struct DistrictOutput<'a> {
    address: &'a str,
    district: Option<District>,
}

#[derive(Debug, Serialize)]
struct EmbedOutput<'a> {
    url: &'a str,
    embed_url: String,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_catalog(path: &Path) -> anyhow::Result<()> {
    let records = load_catalog(path);
    tracing::info!(path = %path.display(), count = records.len(), "catalog loaded");
    print_json(&records)
}

pub(crate) fn run_district(address: &str, profile: &CityProfile) -> anyhow::Result<()> {
    let district = DistrictResolver::new(profile).resolve(address);
    print_json(&DistrictOutput { address, district })
}

pub(crate) fn run_ask(utterance: &str, path: &Path, profile: &CityProfile) -> anyhow::Result<()> {
    let catalog = load_catalog(path);
    let result = cards_for_utterance(utterance, &catalog, profile);
    if result.is_none() {
        tracing::info!("no district found in utterance");
    }
    print_json(&result)
}

pub(crate) fn run_reply(file: Option<&Path>, profile: &CityProfile) -> anyhow::Result<()> {
    let reply = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read reply from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read reply from stdin")?;
            buf
        }
    };
    print_json(&process_reply_for(&reply, profile))
}

pub(crate) fn run_embed(url: &str) -> anyhow::Result<()> {
    print_json(&EmbedOutput {
        url,
        embed_url: to_embed_url(url),
    })
}

pub(crate) fn run_render(places_json: &Path, city: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(places_json)
        .with_context(|| format!("failed to read places from {}", places_json.display()))?;
    let places = parse_places(&raw)
        .with_context(|| format!("invalid places JSON in {}", places_json.display()))?;
    print!("{}", render_catalog(city, &places));
    Ok(())
}
