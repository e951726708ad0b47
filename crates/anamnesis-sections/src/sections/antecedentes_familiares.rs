use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Antecedentes familiares.
pub struct AntecedentesFamiliares;

impl Section for AntecedentesFamiliares {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "antecedentes-familiares",
                "Antecedentes familiares",
                &[],
                &[
                    "enfermedades_familiares",
                    "padre",
                    "madre",
                    "hermanos",
                    "otros_familiares",
                ],
                10,
            )
        });
        &DEFINITION
    }
}
