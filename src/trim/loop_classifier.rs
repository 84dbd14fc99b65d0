use crate::config::Config;
use crate::error::ExtractResult;
use crate::kernel::Kernel;
use crate::normalize::{extract_trim_curve, ParametricFrame};
use crate::record::LoopRecord;

/// Classify a trimming loop of `face` and extract its curves
/// Curves keep the order in which the kernel enumerates the loop's coedges.
pub fn classify_loop<K: Kernel + ?Sized>(
    kernel: &K,
    lp: K::Loop,
    face: K::Face,
    frame: &ParametricFrame,
    config: &Config,
) -> ExtractResult<LoopRecord> {
    let coedges = kernel.coedges(lp)?;
    let loop_type = kernel.loop_type(lp)?;
    log::trace!("{:?} loop with {} coedges", loop_type, coedges.len());

    let curves = coedges
        .into_iter()
        .map(|coedge| extract_trim_curve(kernel, coedge, face, frame, config))
        .collect::<ExtractResult<Vec<_>>>()?;

    Ok(LoopRecord { loop_type, curves })
}
