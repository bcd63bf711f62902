// CSV corpus loading: drop rows with missing cells, then remap categoricals
use schemerec_core::{
    AgeBracket, Domicile, Error, Gender, Result, Scheme, SocialCategory,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

pub const COL_SCHEME_NAME: &str = "scheme_name";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_AGE: &str = "age";
pub const COL_SOCIAL_CATEGORY: &str = "social_category";
pub const COL_GENDER: &str = "gender";
pub const COL_DOMICILE: &str = "domicile_of_tripura";
pub const COL_USER_ID: &str = "user_id";

const REQUIRED_COLUMNS: [&str; 6] = [
    COL_SCHEME_NAME,
    COL_DESCRIPTION,
    COL_AGE,
    COL_SOCIAL_CATEGORY,
    COL_GENDER,
    COL_DOMICILE,
];

/// Cell spellings treated as missing, besides blank cells.
///
/// Same set a dataframe CSV reader treats as NA by default.
const NULL_SPELLINGS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[inline]
fn is_missing(cell: Option<&str>) -> bool {
    match cell.map(str::trim) {
        None => true,
        Some(c) => c.is_empty() || NULL_SPELLINGS.contains(&c),
    }
}

/// Row accounting for one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub dropped_missing: usize,
    pub dropped_unmapped: usize,
    pub rows_kept: usize,
}

/// Cleaned, remapped scheme table in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    schemes: Vec<Scheme>,
    report: LoadReport,
}

impl Corpus {
    #[inline]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Scheme> {
        self.schemes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scheme> {
        self.schemes.iter()
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// First row carrying `user_id`
    pub fn position_of_user(&self, user_id: u64) -> Option<usize> {
        self.schemes.iter().position(|s| s.user_id == Some(user_id))
    }

    /// Occurrences of each scheme name
    pub fn name_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for scheme in &self.schemes {
            *counts.entry(scheme.name.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Reads a scheme dataset.
///
/// Cleaning order: every row with a missing cell in any column is dropped
/// first; the surviving rows are remapped and any row holding a value outside
/// the lookup tables is dropped in a second pass.
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader {
    require_user_id: bool,
}

impl CorpusLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on datasets without a `user_id` column
    #[must_use]
    pub fn require_user_id(mut self, require: bool) -> Self {
        self.require_user_id = require;
        self
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Corpus> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        let corpus = self.load_from_reader(file)?;
        tracing::info!(
            "Loaded {} schemes from {:?} ({} rows read)",
            corpus.len(),
            path,
            corpus.report.rows_read
        );
        Ok(corpus)
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Corpus> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::Csv(e.to_string()))?
            .clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let mut indices = [0usize; 6];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = column(name).ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        }
        let user_col = column(COL_USER_ID);
        if self.require_user_id && user_col.is_none() {
            return Err(Error::MissingColumn(COL_USER_ID.to_string()));
        }
        let width = headers.len();

        let mut report = LoadReport::default();
        let mut complete = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::Csv(e.to_string()))?;
            report.rows_read += 1;
            if (0..width).any(|i| is_missing(record.get(i))) {
                report.dropped_missing += 1;
                continue;
            }
            complete.push(record);
        }

        let mut schemes = Vec::with_capacity(complete.len());
        for record in &complete {
            match remap(record, &indices, user_col) {
                Some(scheme) => schemes.push(scheme),
                None => report.dropped_unmapped += 1,
            }
        }
        report.rows_kept = schemes.len();

        if report.dropped_missing > 0 {
            tracing::warn!("Dropped {} rows with missing values", report.dropped_missing);
        }
        if report.dropped_unmapped > 0 {
            tracing::warn!(
                "Dropped {} rows with values outside the categorical lookup tables",
                report.dropped_unmapped
            );
        }

        if schemes.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let corpus = Corpus { schemes, report };
        for (name, count) in corpus.name_counts() {
            tracing::debug!("{}: {}", name, count);
        }
        Ok(corpus)
    }
}

/// Lookup-table remapping of one complete row; `None` when any value is unmapped
fn remap(record: &csv::StringRecord, indices: &[usize; 6], user_col: Option<usize>) -> Option<Scheme> {
    let cell = |i: usize| record.get(i).map(str::trim).unwrap_or_default();
    let [name, description, age, category, gender, domicile] = *indices;

    let user_id = match user_col {
        Some(col) => Some(cell(col).parse::<u64>().ok()?),
        None => None,
    };

    Some(Scheme {
        name: cell(name).to_string(),
        description: cell(description).to_string(),
        age: cell(age).parse::<AgeBracket>().ok()?,
        social_category: cell(category).parse::<SocialCategory>().ok()?,
        gender: cell(gender).parse::<Gender>().ok()?,
        domicile: cell(domicile).parse::<Domicile>().ok()?,
        user_id,
    })
}
