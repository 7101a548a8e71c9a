use anyhow::Result;
use cmdmatrix::Catalogue;

use super::format::{self, Section};

/// Groups to print: every group, or only the one named by `group_filter`.
pub fn sections<'a>(catalogue: &'a Catalogue, group_filter: Option<&str>) -> Result<Vec<Section<'a>>> {
    let groups: Vec<_> = match group_filter {
        Some(id) => {
            let group = catalogue
                .group_by_id(id)
                .ok_or_else(|| anyhow::anyhow!("unknown group \"{id}\""))?;
            vec![group]
        }
        None => catalogue.groups.iter().collect(),
    };

    Ok(groups
        .into_iter()
        .map(|group| Section {
            group,
            records: group.records.iter().collect(),
        })
        .collect())
}

pub fn run(catalogue: &Catalogue, group_filter: Option<&str>, json: bool) -> Result<()> {
    let sections = sections(catalogue, group_filter)?;
    if json {
        println!("{}", format::json(&sections)?);
    } else {
        print!("{}", format::table(&sections));
    }
    Ok(())
}
