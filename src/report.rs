//! Variant summary report.
//!
//! Walks datasets, collects their variant sets, picks the first one and tallies
//! the reference-base lengths of its variants in a fixed region. Every search is
//! drained completely before the next one starts.

use crate::{
    Error, Result,
    client::Ga4ghClient,
    types::{Dataset, Region, Variant, VariantSet},
};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Count of variants per reference-base length, kept in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceBaseCounts {
    counts: Vec<(usize, usize)>,
    positions: HashMap<usize, usize>,
}

impl ReferenceBaseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variants<'v>(variants: impl IntoIterator<Item = &'v Variant>) -> Self {
        let mut counts = Self::new();
        for variant in variants {
            counts.record(variant.reference_bases.chars().count());
        }
        counts
    }

    pub fn record(&mut self, length: usize) {
        match self.positions.get(&length) {
            Some(&pos) => self.counts[pos].1 += 1,
            None => {
                self.positions.insert(length, self.counts.len());
                self.counts.push((length, 1));
            }
        }
    }

    pub fn get(&self, length: usize) -> Option<usize> {
        self.positions.get(&length).map(|&pos| self.counts[pos].1)
    }

    /// `(length, count)` pairs in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for ReferenceBaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (length, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", length, count)?;
        }
        write!(f, "}}")
    }
}

/// Everything collected during one run
#[derive(Debug, Clone)]
pub struct Report {
    pub datasets: Vec<Dataset>,
    pub variant_sets: Vec<VariantSet>,
    pub variant_set: VariantSet,
    pub variants: Vec<Variant>,
    pub reference_base_counts: ReferenceBaseCounts,
}

pub struct ReportGenerator<'c, C: ?Sized> {
    client: &'c C,
    region: Region,
}

impl<'c, C: Ga4ghClient + ?Sized> ReportGenerator<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Self {
            client,
            region: Region::default(),
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Run all queries and write the report to `out`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when no dataset has a variant set,
    /// before anything about variants is written.
    pub fn run<W: Write + ?Sized>(&self, out: &mut W) -> Result<Report> {
        let response = self.client.search_datasets();
        writeln!(out, "{:?}", response)?;

        let mut datasets = Vec::new();
        for dataset in response {
            let dataset = dataset?;
            writeln!(out, "{:?}", dataset)?;
            datasets.push(dataset);
        }
        tracing::info!(count = datasets.len(), "collected datasets");

        let mut variant_sets = Vec::new();
        for dataset in &datasets {
            for variant_set in self.client.search_variant_sets(&dataset.id) {
                variant_sets.push(variant_set?);
            }
        }
        tracing::info!(count = variant_sets.len(), "collected variant sets");

        let variant_set = variant_sets
            .first()
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index: 0,
                len: variant_sets.len(),
            })?;

        let region = &self.region;
        tracing::info!(
            variant_set = %variant_set.id,
            reference_name = %region.reference_name,
            start = region.start,
            end = region.end,
            "searching variants"
        );
        let variants = self
            .client
            .search_variants(
                &variant_set.id,
                region.start,
                region.end,
                &region.reference_name,
            )
            .collect::<Result<Vec<_>>>()?;

        writeln!(out, "{} variants.", variants.len())?;

        let reference_base_counts = ReferenceBaseCounts::from_variants(&variants);
        writeln!(out, "{}", reference_base_counts)?;

        Ok(Report {
            datasets,
            variant_sets,
            variant_set,
            variants,
            reference_base_counts,
        })
    }
}
