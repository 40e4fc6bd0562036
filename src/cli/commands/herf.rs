//! CLI commands for HERF archive operations

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::formats::herf::{HerfFile, resource_display_name};

/// List the resources in a HERF archive.
pub fn list(source: &Path) -> anyhow::Result<()> {
    let herf = HerfFile::open(source)?;

    println!("{} resources", herf.resource_count());
    println!("{:>5} {:>8} {:>10}  {}", "index", "hash", "size", "name");

    for resource in herf.resources() {
        println!(
            "{:>5} {:08x} {:>10}  {}",
            resource.index,
            resource.hash,
            herf.resource_size(resource.index)?,
            resource_display_name(resource)
        );
    }

    Ok(())
}

/// Extract resources into a directory, optionally a single one by name.
pub fn extract(source: &Path, destination: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let herf = HerfFile::open(source)?;

    fs::create_dir_all(destination)
        .with_context(|| format!("creating {}", destination.display()))?;

    let indices: Vec<u32> = match name {
        Some(name) => {
            let index = herf
                .find(name)
                .with_context(|| format!("no resource named {name}"))?;
            vec![index]
        }
        None => herf.resources().iter().map(|r| r.index).collect(),
    };

    for index in indices {
        let resource = &herf.resources()[index as usize];
        let file_name = resource_display_name(resource);

        let data = herf.resource(index)?;
        fs::write(destination.join(&file_name), data.as_slice())
            .with_context(|| format!("writing {file_name}"))?;

        println!("extracted {file_name}");
    }

    Ok(())
}
