use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::RatingScale;
use crate::reader::Reader;

/// A catalog entry: where a built-in dataset lives relative to the data
/// directory, where it can be fetched from, and how its lines are read.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDataset {
    pub name: &'static str,
    pub url: &'static str,
    pub relative_path: &'static str,
    line_format: &'static str,
    sep: Option<&'static str>,
    skip_lines: usize,
    rating_scale: (f64, f64),
}

impl BuiltinDataset {
    pub fn path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.relative_path)
    }

    pub fn reader(&self) -> Result<Reader> {
        let mut reader = Reader::new(self.line_format)?
            .with_skip_lines(self.skip_lines)
            .with_rating_scale(RatingScale::new(self.rating_scale.0, self.rating_scale.1));
        if let Some(sep) = self.sep {
            reader = reader.with_sep(sep);
        }
        Ok(reader)
    }
}

/// Static name -> configuration table for the built-in datasets.
pub const BUILTIN_DATASETS: &[BuiltinDataset] = &[
    BuiltinDataset {
        name: "ml-100k",
        url: "https://files.grouplens.org/datasets/movielens/ml-100k.zip",
        relative_path: "ml-100k/u.data",
        line_format: "user item rating timestamp",
        sep: Some("\t"),
        skip_lines: 0,
        rating_scale: (1.0, 5.0),
    },
    BuiltinDataset {
        name: "ml-1m",
        url: "https://files.grouplens.org/datasets/movielens/ml-1m.zip",
        relative_path: "ml-1m/ratings.dat",
        line_format: "user item rating timestamp",
        sep: Some("::"),
        skip_lines: 0,
        rating_scale: (1.0, 5.0),
    },
    BuiltinDataset {
        name: "ml-25m",
        url: "https://files.grouplens.org/datasets/movielens/ml-25m.zip",
        relative_path: "ml-25m/ratings.csv",
        line_format: "user item rating timestamp",
        sep: Some(","),
        skip_lines: 1,
        rating_scale: (0.5, 5.0),
    },
    BuiltinDataset {
        name: "jester",
        url: "https://eigentaste.berkeley.edu/dataset/archive/jester_dataset_2.zip",
        relative_path: "jester/jester_ratings.dat",
        line_format: "user item rating",
        sep: None,
        skip_lines: 0,
        rating_scale: (-10.0, 10.0),
    },
];

pub fn builtin_dataset(name: &str) -> Option<&'static BuiltinDataset> {
    BUILTIN_DATASETS.iter().find(|dataset| dataset.name == name)
}

pub fn accepted_names() -> String {
    BUILTIN_DATASETS
        .iter()
        .map(|dataset| dataset.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Boundary collaborator that obtains a catalog dataset's backing file.
/// On success a readable file must exist at `dest`; how it gets there
/// (download, copy, decompression) is entirely up to the implementation.
pub trait Fetcher {
    fn fetch(&self, dataset: &BuiltinDataset, dest: &Path) -> anyhow::Result<()>;
}

/// What to do when a catalog dataset's backing file is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPolicy {
    /// Ask on stdin; a declined prompt terminates the process.
    Prompt,
    /// Fetch without asking.
    AutoConfirm,
    /// Never fetch; absent files surface as a declined download.
    Deny,
}

/// Interactive Y/n confirmation loop. EOF counts as a refusal.
pub(crate) fn confirm_download(name: &str) -> bool {
    let stdin = io::stdin();
    loop {
        print!("Dataset {name} could not be found. Do you want to download it? [Y/n] ");
        let _ = io::stdout().flush();

        let mut choice = String::new();
        match stdin.lock().read_line(&mut choice) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }
        match choice.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => {}
        }
    }
}
