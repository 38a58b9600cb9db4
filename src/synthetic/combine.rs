//! Assembling the balanced frame

use crate::error::{Result, SdmbError};
use crate::synthetic::SyntheticRow;
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Materialise synthetic rows as a frame with the schema of `minority`.
///
/// Source rows are taken from `minority`, so the target column keeps its
/// values and dtype; only perturbed feature cells are overwritten.
pub fn synthetic_frame(
    minority: &DataFrame,
    features: &[String],
    rows: &[SyntheticRow],
) -> Result<DataFrame> {
    let sources: Vec<IdxSize> = rows.iter().map(|r| r.source as IdxSize).collect();
    let mut frame = minority.take(&IdxCa::from_vec("source".into(), sources))?;

    for (j, name) in features.iter().enumerate() {
        let series = frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let filled: Float64Chunked = series
            .f64()?
            .into_iter()
            .zip(rows)
            .map(|(original, row)| {
                if row.is_perturbed(j) {
                    Some(row.values[j])
                } else {
                    original
                }
            })
            .collect();

        frame.with_column(filled.with_name(name.as_str().into()).into_series())?;
    }

    Ok(frame)
}

/// Stack majority, minority and synthetic rows, then shuffle all rows once
pub fn combine<R: Rng>(
    majority: &DataFrame,
    minority: &DataFrame,
    synthetic: &DataFrame,
    rng: &mut R,
) -> Result<DataFrame> {
    if majority.get_column_names() != minority.get_column_names()
        || minority.get_column_names() != synthetic.get_column_names()
    {
        return Err(SdmbError::SchemaError(
            "row groups to combine have different columns".to_string(),
        ));
    }

    let mut combined = majority.vstack(minority)?;
    combined.vstack_mut(synthetic)?;

    let mut order: Vec<IdxSize> = (0..combined.height() as IdxSize).collect();
    order.shuffle(rng);

    Ok(combined.take(&IdxCa::from_vec("order".into(), order))?)
}
