pub mod builtin;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{RawRating, TestRating};
use crate::reader::Reader;
use crate::trainset::builder::{build_testset, build_trainset};
use crate::trainset::Trainset;
use crate::utils::expand_user;

pub use builtin::{builtin_dataset, BuiltinDataset, DownloadPolicy, Fetcher, BUILTIN_DATASETS};

/// How the raw ratings are obtained. The variants only differ in how
/// records are produced; indexing is shared by all of them.
#[derive(Debug)]
enum Source {
    /// A fixed ratings file, parsed eagerly at load time.
    File {
        path: PathBuf,
        raw_ratings: Vec<RawRating>,
    },
    /// In-memory `(user, item, rating)` rows. No timestamps.
    Rows { raw_ratings: Vec<RawRating> },
    /// Pre-split train/test file pairs, parsed per fold.
    Folds { files: Vec<(PathBuf, PathBuf)> },
}

/// A named handle on a source of raw ratings plus the reader that parses
/// them. Terminal outputs are [`Trainset`]s and raw-id testsets.
#[derive(Debug)]
pub struct Dataset {
    reader: Reader,
    source: Source,
}

impl Dataset {
    /// Load ratings from a delimited text file. The path is checked before
    /// any parsing and the whole file is parsed eagerly.
    pub fn load_from_file(path: impl AsRef<Path>, reader: Reader) -> Result<Self> {
        let path = expand_user(path.as_ref());
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }

        let raw_ratings = read_ratings(&reader, &path)?;
        info!(
            "Loaded {} ratings from {}",
            raw_ratings.len(),
            path.display()
        );
        Ok(Self {
            reader,
            source: Source::File { path, raw_ratings },
        })
    }

    /// Load ratings from in-memory `(user, item, rating)` rows. The rows
    /// carry no timestamp, only the reader's rating scale applies.
    pub fn load_from_rows<I>(rows: I, reader: Reader) -> Self
    where
        I: IntoIterator<Item = (String, String, f64)>,
    {
        let raw_ratings = rows
            .into_iter()
            .map(|(uid, iid, rating)| RawRating {
                uid,
                iid,
                rating,
                timestamp: None,
            })
            .collect();
        Self {
            reader,
            source: Source::Rows { raw_ratings },
        }
    }

    /// Load a fold-based dataset from pre-split `(train, test)` file pairs.
    /// Every path must exist up front; a missing one aborts before any file
    /// is opened for parsing.
    pub fn load_from_folds(files: Vec<(PathBuf, PathBuf)>, reader: Reader) -> Result<Self> {
        let files: Vec<(PathBuf, PathBuf)> = files
            .into_iter()
            .map(|(train, test)| (expand_user(&train), expand_user(&test)))
            .collect();

        for (train, test) in &files {
            for path in [train, test] {
                if !path.is_file() {
                    return Err(Error::NotFound(path.clone()));
                }
            }
        }

        Ok(Self {
            reader,
            source: Source::Folds { files },
        })
    }

    /// Load a built-in dataset by catalog name. If its backing file is
    /// absent the `fetcher` collaborator is invoked under `policy`; with
    /// [`DownloadPolicy::Prompt`] a declined confirmation logs and
    /// terminates the process with a non-zero exit code.
    pub fn load_builtin(
        name: &str,
        config: &Config,
        fetcher: &dyn Fetcher,
        policy: DownloadPolicy,
    ) -> Result<Self> {
        let dataset = builtin_dataset(name).ok_or_else(|| {
            Error::Configuration(format!(
                "unknown dataset {name}; accepted values are {}",
                builtin::accepted_names()
            ))
        })?;

        let path = dataset.path(&config.data.data_dir);
        if !path.is_file() {
            let confirmed = match policy {
                DownloadPolicy::AutoConfirm => true,
                DownloadPolicy::Deny => false,
                DownloadPolicy::Prompt => builtin::confirm_download(name),
            };
            if !confirmed {
                if policy == DownloadPolicy::Prompt {
                    info!("Download of dataset {} declined, aborting", name);
                    std::process::exit(1);
                }
                return Err(Error::UserAborted(name.to_owned()));
            }

            info!("Fetching dataset {} into {}", name, path.display());
            fetcher
                .fetch(dataset, &path)
                .map_err(|source| Error::Fetch {
                    name: name.to_owned(),
                    source,
                })?;
        }

        Self::load_from_file(&path, dataset.reader()?)
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// The backing file, for file-based datasets.
    pub fn ratings_file(&self) -> Option<&Path> {
        match &self.source {
            Source::File { path, .. } => Some(path),
            Source::Rows { .. } | Source::Folds { .. } => None,
        }
    }

    /// The parsed raw records. Fold-based datasets have no single record
    /// list, use [`Dataset::folds`] instead.
    pub fn raw_ratings(&self) -> Result<&[RawRating]> {
        match &self.source {
            Source::File { raw_ratings, .. } | Source::Rows { raw_ratings } => Ok(raw_ratings),
            Source::Folds { .. } => Err(Error::Configuration(
                "fold-based datasets have no single ratings list".to_owned(),
            )),
        }
    }

    /// Index the entire record list into one trainset.
    pub fn build_full_trainset(&self) -> Result<Trainset> {
        let raw_ratings = self.raw_ratings().map_err(|_| {
            Error::Configuration(
                "cannot build a full trainset from a fold-based dataset".to_owned(),
            )
        })?;
        Ok(build_trainset(raw_ratings, self.reader.rating_scale))
    }

    /// Parse each train/test pair into an independent `(Trainset, testset)`
    /// fold. Ids are never shared across folds.
    pub fn folds(&self) -> Result<Vec<(Trainset, Vec<TestRating>)>> {
        let files = match &self.source {
            Source::Folds { files } => files,
            Source::File { .. } | Source::Rows { .. } => {
                return Err(Error::Configuration(
                    "dataset was not loaded from fold files".to_owned(),
                ))
            }
        };

        let mut folds = Vec::with_capacity(files.len());
        for (train_path, test_path) in files {
            let train_records = read_ratings(&self.reader, train_path)?;
            let test_records = read_ratings(&self.reader, test_path)?;
            folds.push((
                build_trainset(&train_records, self.reader.rating_scale),
                build_testset(&test_records),
            ));
        }
        Ok(folds)
    }
}

fn read_ratings(reader: &Reader, path: &Path) -> Result<Vec<RawRating>> {
    let file = File::open(path)?;
    let mut raw_ratings = Vec::new();
    for line in BufReader::new(file).lines().skip(reader.skip_lines) {
        raw_ratings.push(reader.parse_line(&line?)?);
    }
    Ok(raw_ratings)
}

/// Shuffle the dataset's records and split them into a trainset and a
/// raw-id testset. `test_fraction` is the share of records held out.
pub fn train_test_split<R: Rng>(
    dataset: &Dataset,
    rng: &mut R,
    test_fraction: f64,
) -> Result<(Trainset, Vec<TestRating>)> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(Error::Configuration(format!(
            "test fraction {test_fraction} is not within [0, 1]"
        )));
    }

    let mut records = dataset.raw_ratings()?.to_vec();
    records.shuffle(rng);
    let n_test = (test_fraction * records.len() as f64) as usize;
    let (test, train) = records.split_at(n_test);

    Ok((
        build_trainset(train, dataset.reader().rating_scale),
        build_testset(test),
    ))
}
