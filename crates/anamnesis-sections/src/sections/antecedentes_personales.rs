use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Antecedentes personales: past medical and surgical history, allergies
/// and current medication.
pub struct AntecedentesPersonales;

impl Section for AntecedentesPersonales {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "antecedentes-personales",
                "Antecedentes personales",
                &[],
                &[
                    "enfermedades_cronicas",
                    "cirugias",
                    "alergias",
                    "medicamentos_actuales",
                    "hospitalizaciones",
                    "vacunas",
                ],
                15,
            )
        });
        &DEFINITION
    }
}
