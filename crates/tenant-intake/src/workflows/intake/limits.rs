use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::settings::RentLimit;

#[derive(Debug, thiserror::Error)]
pub enum LimitsImportError {
    #[error("unable to parse rent limits CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("bedroom count {0} appears more than once")]
    DuplicateBedrooms(usize),
}

/// Read a rent table export into rows indexed by bedroom count.
///
/// Columns are `nb_bedrooms,maximum_federal_lihtc_rent,utility_allowance,non_optional_charges`
/// in cents. Bedroom counts without a row are filled with an all-empty entry.
pub fn import_rent_limits<R: Read>(reader: R) -> Result<Vec<RentLimit>, LimitsImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = BTreeMap::new();

    for record in csv_reader.deserialize::<RentLimitRow>() {
        let row = record?;
        let bedrooms = row.nb_bedrooms;
        if rows.insert(bedrooms, row.into_limit()).is_some() {
            return Err(LimitsImportError::DuplicateBedrooms(bedrooms));
        }
    }

    let size = rows.keys().next_back().map(|max| max + 1).unwrap_or(0);
    let mut table = vec![RentLimit::default(); size];
    for (bedrooms, limit) in rows {
        table[bedrooms] = limit;
    }

    info!(rows = table.len(), "imported rent limits");
    Ok(table)
}

#[derive(Debug, Deserialize)]
struct RentLimitRow {
    nb_bedrooms: usize,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    maximum_federal_lihtc_rent: Option<i64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    utility_allowance: Option<i64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    non_optional_charges: Option<i64>,
}

impl RentLimitRow {
    fn into_limit(self) -> RentLimit {
        RentLimit {
            maximum_federal_lihtc_rent: self.maximum_federal_lihtc_rent,
            utility_allowance: self.utility_allowance,
            non_optional_charges: self.non_optional_charges,
        }
    }
}

fn empty_cell_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
