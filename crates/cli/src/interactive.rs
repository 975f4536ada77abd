//! The interactive catalog/field/phi manager.
//!
//! Every mutation persists the whole catalog file before returning to the
//! menu, so quitting at any point never loses a completed action.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use resonance_catalog::{store, ArtefactSpec, Catalog, CatalogError, Dimension};
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(catalog_path: &Path) -> Result<()> {
    let mut catalog = load_or_init(catalog_path)?;

    let actions = [
        "Add artefact",
        "Update artefact scores",
        "Define field",
        "Compute phi",
        "Show catalog",
        "Quit",
    ];
    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} manager", catalog.project_name()))
            .items(&actions)
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => add_artefact(&mut catalog, catalog_path),
            1 => update_scores(&mut catalog, catalog_path),
            2 => define_field(&mut catalog, catalog_path),
            3 => show_phi(&catalog),
            4 => {
                show_catalog(&catalog);
                Ok(())
            }
            _ => break,
        };
        // Keep the menu alive on a failed action; the catalog was not saved.
        if let Err(err) = outcome {
            println!("{} {err}", style("Error:").red().bold());
        }
    }
    Ok(())
}

fn load_or_init(path: &Path) -> Result<Catalog> {
    match store::load(path) {
        Ok(catalog) => Ok(catalog),
        Err(CatalogError::Missing(_)) => init_catalog(path),
        Err(err) => Err(err.into()),
    }
}

fn init_catalog(path: &Path) -> Result<Catalog> {
    println!(
        "{}",
        style(format!("No catalog at {}; creating one.", path.display())).bold()
    );
    let project_name: String = Input::new().with_prompt("Project name").interact_text()?;
    let scale_max: u32 = Input::new()
        .with_prompt("Scale max (scores run 0..=scale_max)")
        .default(4)
        .interact_text()?;
    let mut catalog = Catalog::new(project_name, scale_max)?;

    println!("Define the scoring dimensions, in order. Order is permanent.");
    loop {
        let name: String = Input::new()
            .with_prompt("Dimension name (empty to finish)")
            .allow_empty(true)
            .interact_text()?;
        if name.trim().is_empty() {
            if catalog.dimensions().is_empty() {
                println!("At least one dimension is required.");
                continue;
            }
            break;
        }
        let label: String = Input::new().with_prompt("Label").interact_text()?;
        let description: String = Input::new()
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?;
        catalog.add_dimension(Dimension {
            name: name.trim().to_string(),
            label,
            description,
        })?;
    }

    store::save(&catalog, path)?;
    println!("Catalog saved to {}", path.display());
    Ok(catalog)
}

fn prompt_scores(catalog: &Catalog) -> Result<BTreeMap<String, u32>> {
    let scale_max = catalog.scale_max();
    let dimensions: Vec<Dimension> = catalog.dimensions().to_vec();
    let mut scores = BTreeMap::new();
    for dimension in dimensions {
        let score: u32 = Input::new()
            .with_prompt(format!("{} [0..={scale_max}]", dimension.label))
            .validate_with(move |value: &u32| {
                if *value <= scale_max {
                    Ok(())
                } else {
                    Err(format!("score must be at most {scale_max}"))
                }
            })
            .interact_text()?;
        scores.insert(dimension.name, score);
    }
    Ok(scores)
}

fn add_artefact(catalog: &mut Catalog, path: &Path) -> Result<()> {
    let id: String = Input::new().with_prompt("Artefact id").interact_text()?;
    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let kind: String = Input::new()
        .with_prompt("Kind")
        .default("text".to_string())
        .interact_text()?;
    let raw_path: String = Input::new()
        .with_prompt("Raw path (optional)")
        .allow_empty(true)
        .interact_text()?;
    let notes: String = Input::new()
        .with_prompt("Notes")
        .allow_empty(true)
        .interact_text()?;
    let scores_raw = prompt_scores(catalog)?;

    catalog.add_artefact(ArtefactSpec {
        id: id.clone(),
        name,
        kind,
        raw_path: (!raw_path.trim().is_empty()).then(|| raw_path.trim().to_string()),
        notes,
        scores_raw,
    })?;
    store::save(catalog, path)?;
    println!("Registered artefact '{id}'.");
    Ok(())
}

fn update_scores(catalog: &mut Catalog, path: &Path) -> Result<()> {
    let id = pick_artefact(catalog)?;
    let scores_raw = prompt_scores(catalog)?;
    catalog.update_scores(&id, scores_raw)?;
    store::save(catalog, path)?;
    println!("Updated scores for '{id}'.");
    Ok(())
}

fn define_field(catalog: &mut Catalog, path: &Path) -> Result<()> {
    let ids: Vec<String> = catalog.artefacts().iter().map(|a| a.id.clone()).collect();
    if ids.is_empty() {
        println!("Register artefacts before defining the field.");
        return Ok(());
    }
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Prototype artefacts for the field")
        .items(&ids)
        .interact()?;
    let prototype_ids: Vec<String> = picked.into_iter().map(|i| ids[i].clone()).collect();
    catalog.define_field(prototype_ids)?;
    store::save(catalog, path)?;

    if let Some(field) = catalog.field() {
        println!("Field vector: {:?}", field.vector);
    }
    Ok(())
}

fn show_phi(catalog: &Catalog) -> Result<()> {
    let id = pick_artefact(catalog)?;
    let phi = catalog.phi(&id)?;
    println!("phi({id}) = {phi:.4}");
    Ok(())
}

fn pick_artefact(catalog: &Catalog) -> Result<String> {
    let ids: Vec<String> = catalog.artefacts().iter().map(|a| a.id.clone()).collect();
    anyhow::ensure!(!ids.is_empty(), "the catalog has no artefacts yet");
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Artefact")
        .items(&ids)
        .default(0)
        .interact()?;
    Ok(ids[choice].clone())
}

fn show_catalog(catalog: &Catalog) {
    println!(
        "{} (scale 0..={})",
        style(catalog.project_name()).bold(),
        catalog.scale_max()
    );
    println!("Dimensions:");
    for dimension in catalog.dimensions() {
        println!("  {}: {}", dimension.name, dimension.label);
    }
    println!("Artefacts:");
    for artefact in catalog.artefacts() {
        println!(
            "  {} ({}) scores={:?}",
            artefact.id, artefact.kind, artefact.scores_raw
        );
    }
    match catalog.field() {
        Some(field) => println!("Field from {:?}: {:?}", field.prototype_ids, field.vector),
        None => println!("Field: not defined"),
    }
}
