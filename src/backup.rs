//! CSV backup of the records scraped in one run
//!
//! The file is UTF-8 with a byte-order mark so spreadsheet tools pick the
//! right encoding for Japanese text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::extractor::{Ingredient, RecipeRecord};

const UTF8_BOM: &[u8] = "\u{FEFF}".as_bytes();

/// Column order of the backup file
pub const BACKUP_HEADER: [&str; 8] = [
    "title",
    "main_image",
    "main_ingredients",
    "eating_method",
    "cooking_method",
    "ingredients",
    "detailUrl",
    "category",
];

/// Flatten ingredients into one line per entry.
///
/// `name：amount` when both are present, `name` alone when only the name is,
/// nothing when the name is blank.
#[must_use]
pub fn ingredients_to_string(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .filter_map(|ing| {
            let name = ing.name.trim();
            let amount = ing.amount.trim();
            match (name.is_empty(), amount.is_empty()) {
                (false, false) => Some(format!("{name}：{amount}")),
                (false, true) => Some(name.to_string()),
                (true, _) => None,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `records` to `writer` as BOM-prefixed CSV with CRLF row endings.
pub fn write_records<W: Write>(mut writer: W, records: &[RecipeRecord]) -> Result<()> {
    writer.write_all(UTF8_BOM).context("Failed to write BOM")?;

    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(BACKUP_HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        let ingredients = ingredients_to_string(&record.ingredients);
        csv.write_record([
            record.title.as_str(),
            record.main_image.as_str(),
            record.main_ingredients.as_str(),
            record.eating_method.as_str(),
            record.cooking_method.as_str(),
            ingredients.as_str(),
            record.detail_url.as_str(),
            record.category.as_str(),
        ])
        .with_context(|| format!("Failed to write CSV row for {}", record.detail_url))?;
    }

    csv.flush().context("Failed to flush CSV")?;
    Ok(())
}

/// Create (or truncate) `path` and write the backup into it.
pub fn write_backup(path: &Path, records: &[RecipeRecord]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create backup file {}", path.display()))?;
    write_records(BufWriter::new(file), records)?;

    log::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
