use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Historia de la enfermedad actual: onset, course and modifiers of the
/// present illness.
pub struct HistoriaEnfermedad;

impl Section for HistoriaEnfermedad {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "historia-enfermedad",
                "Historia de la enfermedad actual",
                &[],
                &[
                    "inicio",
                    "evolucion",
                    "sintomas_asociados",
                    "tratamientos_previos",
                    "factores_agravantes",
                    "factores_atenuantes",
                ],
                20,
            )
        });
        &DEFINITION
    }
}
