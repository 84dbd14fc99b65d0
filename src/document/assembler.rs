use crate::config::Config;
use crate::error::{ExtractError, ExtractResult};
use crate::kernel::{DiagnosticLevel, Geometry, Kernel, KernelError};
use crate::normalize::{extract_surface, ParametricFrame};
use crate::record::{BodyDocument, FaceDocument, SkippedFace};
use crate::trim::classify_loop;

/// Document scoped face identifier
/// Bodies with differing entity counts can share identifiers; kept for schema compatibility.
pub fn face_id(face_index: usize, body_index: usize, entity_count: usize) -> usize {
    face_index + entity_count * body_index
}

/// Walks the kernel's bodies and assembles one [`BodyDocument`] per body
pub struct Assembler<'a, K: Kernel> {
    kernel: &'a mut K,
    config: &'a Config,
    bodies: Vec<K::Body>,
}

impl<'a, K: Kernel> Assembler<'a, K> {
    pub fn new(kernel: &'a mut K, config: &'a Config) -> ExtractResult<Self> {
        let bodies = kernel.entities()?;
        let mut assembler = Self {
            kernel,
            config,
            bodies,
        };
        assembler.report_diagnostics();
        Ok(assembler)
    }

    /// Number of top level entities in the model
    pub fn entity_count(&self) -> usize {
        self.bodies.len()
    }

    /// Assemble every body in order
    /// A critical error on any body discards the documents assembled so far.
    /// Call [`Assembler::assemble_body`] per body to keep them.
    pub fn assemble_all(&mut self) -> ExtractResult<Vec<BodyDocument>> {
        (0..self.entity_count())
            .map(|body_index| self.assemble_body(body_index))
            .collect()
    }

    /// Assemble the document of one body
    /// Faces failing with a face scoped error are skipped and recorded in the document.
    pub fn assemble_body(&mut self, body_index: usize) -> ExtractResult<BodyDocument> {
        let body = *self.bodies.get(body_index).ok_or_else(|| {
            KernelError::new("entities", format!("no body #{}", body_index))
        })?;

        self.kernel.split_periodic_faces(body)?;
        self.report_diagnostics();
        if !self.config.transform {
            self.kernel.remove_transform(body)?;
            self.report_diagnostics();
        }

        let faces = self.kernel.faces(body)?;
        self.report_diagnostics();
        log::debug!("body #{}: {} faces", body_index, faces.len());

        let mut document = BodyDocument::default();
        for (face_index, face) in faces.into_iter().enumerate() {
            let result = self.extract_face(body_index, face_index, face);
            self.report_diagnostics();
            match result {
                Ok(face) => document.faces.push(face),
                Err(reason) if reason.is_face_scoped() => {
                    if self.config.warnings {
                        log::warn!(
                            "Face #{} of Body #{} skipped: {}",
                            face_index,
                            body_index,
                            reason
                        );
                    }
                    document.skipped.push(SkippedFace { face_index, reason });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(document)
    }

    fn extract_face(
        &mut self,
        body_index: usize,
        face_index: usize,
        face: K::Face,
    ) -> ExtractResult<FaceDocument> {
        let sense = self.kernel.face_sense(face)?;
        if self.config.bspline {
            self.kernel.convert_to_spline(face)?;
        }

        let kernel = &*self.kernel;
        let config = self.config;
        match kernel.face_geometry(face)? {
            Geometry::Spline => {}
            Geometry::Other(name) => return Err(ExtractError::UnsupportedGeometry(name)),
        }

        let surface = extract_surface(kernel, face, config)?;
        let frame = ParametricFrame::from_range(&kernel.surface_range(face)?);

        let loops = kernel.loops(face)?;
        let trims = if config.trims {
            let records = loops
                .into_iter()
                .map(|lp| classify_loop(kernel, lp, face, &frame, config))
                .collect::<ExtractResult<Vec<_>>>()?;
            Some(records)
        } else {
            None
        };

        Ok(FaceDocument {
            id: face_id(face_index, body_index, self.entity_count()),
            sense: config.sense.then_some(sense),
            surface,
            trims,
        })
    }

    /// Drain kernel diagnostics, logged only when kernel warnings are enabled
    fn report_diagnostics(&mut self) {
        let diagnostics = self.kernel.take_diagnostics();
        if !self.config.acis_warnings {
            return;
        }
        diagnostics.iter().for_each(|d| match d.level {
            DiagnosticLevel::Error => log::warn!(
                "Kernel encountered a non-critical error in '{}': {}",
                d.call,
                d.message
            ),
            DiagnosticLevel::Warning => {
                log::warn!("Kernel warning in '{}': {}", d.call, d.message)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::face_id;

    #[test]
    fn legacy_face_identifiers() {
        assert_eq!(face_id(0, 0, 1), 0);
        assert_eq!(face_id(3, 0, 2), 3);
        assert_eq!(face_id(3, 1, 2), 5);
        // a body with many faces runs into the next body's range
        assert_eq!(face_id(5, 0, 3), face_id(2, 1, 3));
    }
}
