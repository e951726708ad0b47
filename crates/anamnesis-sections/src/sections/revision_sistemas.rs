use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Revisión por sistemas. One free-text field per organ system.
pub struct RevisionSistemas;

impl Section for RevisionSistemas {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "revision-sistemas",
                "Revisión por sistemas",
                &[],
                &[
                    "cardiovascular",
                    "respiratorio",
                    "digestivo",
                    "neurologico",
                    "genitourinario",
                    "musculoesqueletico",
                    "piel",
                ],
                10,
            )
        });
        &DEFINITION
    }
}
