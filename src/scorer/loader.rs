use super::types::{Individual, Pool, TargetDistribution};
use crate::error::{SampPickError, SpResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

fn reader_for<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn malformed(path: &Path, rec: &csv::StringRecord, reason: String) -> SampPickError {
    SampPickError::MalformedInput {
        path: path.to_path_buf(),
        line: rec.position().map(|p| p.line()).unwrap_or(0),
        reason,
    }
}

pub fn load_target_distribution<P: AsRef<Path>>(path: P) -> SpResult<TargetDistribution> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_target_distribution(file, path)
}

/// Reads `allele,frequency` rows after a header line. Rows with frequency 0
/// are dropped; a frequency that does not parse, is negative, or is not finite
/// is rejected.
pub fn read_target_distribution<R: Read>(source: R, path: &Path) -> SpResult<TargetDistribution> {
    let mut rdr = reader_for(source);
    let mut pairs = Vec::new();
    let mut dropped = 0;

    for result in rdr.records() {
        let rec = result?;
        if rec.len() < 2 {
            return Err(malformed(
                path,
                &rec,
                format!("expected 'allele,frequency', found {} field(s)", rec.len()),
            ));
        }

        let allele = &rec[0];
        let freq: f64 = rec[1]
            .parse()
            .map_err(|_| malformed(path, &rec, format!("invalid frequency '{}'", &rec[1])))?;

        if !freq.is_finite() || freq < 0.0 {
            return Err(malformed(
                path,
                &rec,
                format!("frequency must be a non-negative number, got {}", freq),
            ));
        }
        if freq == 0.0 {
            dropped += 1;
            continue;
        }
        pairs.push((allele.to_string(), freq));
    }

    let target = TargetDistribution::from_pairs(pairs);
    debug!(
        "   -> {} alleles kept, {} zero-frequency rows dropped",
        target.len(),
        dropped
    );

    let total = target.distribution().total();
    if (total - 1.0).abs() > 1e-3 {
        warn!(
            "⚠️  Target frequencies in '{}' sum to {:.4}, not 1.",
            path.display(),
            total
        );
    }
    Ok(target)
}

pub fn load_individuals<P: AsRef<Path>>(path: P) -> SpResult<Vec<Individual>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_individuals(file, path)
}

/// Reads `id,allele1,allele2` rows after a header line, every row kept.
pub fn read_individuals<R: Read>(source: R, path: &Path) -> SpResult<Vec<Individual>> {
    let mut rdr = reader_for(source);
    let mut individuals = Vec::new();

    for result in rdr.records() {
        let rec = result?;
        if rec.len() < 3 {
            return Err(malformed(
                path,
                &rec,
                format!("expected 'id,allele1,allele2', found {} field(s)", rec.len()),
            ));
        }
        if rec[0].is_empty() {
            return Err(malformed(path, &rec, "empty donor id".to_string()));
        }
        individuals.push(Individual::new(&rec[0], &rec[1], &rec[2]));
    }
    Ok(individuals)
}

pub fn load_pool<P: AsRef<Path>>(path: P) -> SpResult<Pool> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_pool(file, path)
}

pub fn read_pool<R: Read>(source: R, path: &Path) -> SpResult<Pool> {
    let individuals = read_individuals(source, path)?;
    let rows = individuals.len();
    let pool = Pool::from_individuals(individuals);

    if pool.len() < rows {
        warn!(
            "⚠️  '{}' repeats {} donor id(s); the last row for each id wins.",
            path.display(),
            rows - pool.len()
        );
    }
    info!("   -> {} donors available", pool.len());
    Ok(pool)
}
