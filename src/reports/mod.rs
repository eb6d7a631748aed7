pub mod chart;
pub mod tables;

use crate::error::SpResult;
use crate::scorer::{Cohort, FrequencyDistribution, Pool, TargetDistribution};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display};
use tracing::{debug, info, warn};

/// Chart rows must sum above this across all columns.
pub const CHART_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum FixedColumn {
    #[strum(serialize = "Background Distribution")]
    Background,
    #[strum(serialize = "Reference")]
    Reference,
}

#[derive(Debug, Clone)]
pub struct FrequencyColumn {
    pub label: String,
    pub values: Vec<f64>,
}

/// Frequencies side by side, one row per target allele in target file order.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    alleles: Vec<String>,
    columns: Vec<FrequencyColumn>,
}

impl FrequencyTable {
    /// Starts a table whose first column is the target itself.
    pub fn new(target: &TargetDistribution) -> Self {
        let alleles: Vec<String> = target.domain().iter().map(str::to_string).collect();
        let values = target.iter().map(|(_, f)| f).collect();
        Self {
            alleles,
            columns: vec![FrequencyColumn {
                label: FixedColumn::Background.to_string(),
                values,
            }],
        }
    }

    pub fn push_column(&mut self, label: impl Into<String>, dist: &FrequencyDistribution) {
        let values = self.alleles.iter().map(|a| dist.get(a)).collect();
        self.columns.push(FrequencyColumn {
            label: label.into(),
            values,
        });
    }

    pub fn alleles(&self) -> &[String] {
        &self.alleles
    }

    pub fn columns(&self) -> &[FrequencyColumn] {
        &self.columns
    }

    pub fn row(&self, idx: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c.values[idx]).collect()
    }

    /// Rows whose summed frequency exceeds `threshold`, sorted by allele code.
    pub fn chart_rows(&self, threshold: f64) -> Vec<(&str, Vec<f64>)> {
        let mut rows: Vec<(&str, Vec<f64>)> = self
            .alleles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), self.row(i)))
            .filter(|(_, vals)| vals.iter().sum::<f64>() > threshold)
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

pub fn write_donors<W: Write>(writer: W, cohort: &Cohort, pool: &Pool) -> SpResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Donor", "Allele_1", "Allele_2"])?;
    for ind in cohort.individuals(pool) {
        wtr.write_record([&ind.id, &ind.alleles[0], &ind.alleles[1]])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_frequencies<W: Write>(writer: W, table: &FrequencyTable) -> SpResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(|c| c.label.clone()));
    wtr.write_record(&header)?;

    for (i, allele) in table.alleles().iter().enumerate() {
        let mut record = vec![allele.clone()];
        record.extend(table.row(i).iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_history<W: Write>(writer: W, history: &[f64]) -> SpResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Iteration", "Score"])?;
    for (i, score) in history.iter().enumerate() {
        wtr.write_record([i.to_string(), score.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Final artifact locations derived from the `--outfile` base name.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub donors: PathBuf,
    pub frequencies: PathBuf,
    pub chart: PathBuf,
    pub history: PathBuf,
}

impl ArtifactPaths {
    pub fn new(base: &str) -> Self {
        Self {
            donors: PathBuf::from(format!("{base}_donors_selected.csv")),
            frequencies: PathBuf::from(format!("{base}_frequencies.csv")),
            chart: PathBuf::from(format!("{base}.png")),
            history: PathBuf::from(format!("{base}_scores.csv")),
        }
    }
}

/// Files written under a temporary name and moved into place together.
/// Dropping an uncommitted set removes whatever was staged.
struct StagedArtifacts {
    pending: Vec<(PathBuf, PathBuf)>,
}

impl StagedArtifacts {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Stages next to `target`, keeping the extension so format sniffing by
    /// extension still works.
    fn stage(&mut self, target: &Path) -> PathBuf {
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match target.extension() {
            Some(ext) => format!("{}.partial.{}", stem, ext.to_string_lossy()),
            None => format!("{}.partial", stem),
        };
        let staged = target.with_file_name(name);
        self.pending.push((staged.clone(), target.to_path_buf()));
        staged
    }

    fn write_with<F>(&mut self, target: &Path, write: F) -> SpResult<()>
    where
        F: FnOnce(fs::File) -> SpResult<()>,
    {
        let staged = self.stage(target);
        let file = fs::File::create(&staged)?;
        write(file)
    }

    /// Renames every staged file into place. If one rename fails, the targets
    /// already renamed are removed and the rest stay pending for `Drop`.
    fn commit(mut self) -> SpResult<()> {
        for i in 0..self.pending.len() {
            let (staged, target) = &self.pending[i];
            if let Err(e) = fs::rename(staged, target) {
                for (_, done) in self.pending.drain(..i) {
                    if let Err(e) = fs::remove_file(&done) {
                        warn!("⚠️  Could not roll back {}: {}", done.display(), e);
                    }
                }
                return Err(e.into());
            }
        }
        for (_, target) in self.pending.drain(..) {
            info!("💾 Wrote {}", target.display());
        }
        Ok(())
    }
}

impl Drop for StagedArtifacts {
    fn drop(&mut self) {
        for (staged, _) in &self.pending {
            if staged.exists() {
                if let Err(e) = fs::remove_file(staged) {
                    warn!("⚠️  Could not remove {}: {}", staged.display(), e);
                }
            }
        }
    }
}

pub struct ReportWriter {
    paths: ArtifactPaths,
}

impl ReportWriter {
    pub fn new(base: &str) -> Self {
        Self {
            paths: ArtifactPaths::new(base),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Writes the selected donors, the frequency table, the chart and,
    /// when given, the score history. Either all of them land or none.
    pub fn write_selection(
        &self,
        cohort: &Cohort,
        pool: &Pool,
        table: &FrequencyTable,
        history: Option<&[f64]>,
    ) -> SpResult<()> {
        let mut staged = StagedArtifacts::new();

        staged.write_with(&self.paths.donors, |f| write_donors(f, cohort, pool))?;
        staged.write_with(&self.paths.frequencies, |f| write_frequencies(f, table))?;
        if let Some(h) = history {
            staged.write_with(&self.paths.history, |f| write_history(f, h))?;
        }
        let chart_path = staged.stage(&self.paths.chart);
        chart::render_bar_chart(&chart_path, table)?;

        debug!("All artifacts staged, committing");
        staged.commit()
    }

    /// Basic mode: frequency table and chart only.
    pub fn write_basic(&self, table: &FrequencyTable) -> SpResult<()> {
        let mut staged = StagedArtifacts::new();
        staged.write_with(&self.paths.frequencies, |f| write_frequencies(f, table))?;
        let chart_path = staged.stage(&self.paths.chart);
        chart::render_bar_chart(&chart_path, table)?;
        staged.commit()
    }
}
